use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::SensorKind;

/// One remote object to fetch, with the metadata needed to mirror it locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeyRecord {
    pub key: String,
    pub kind: SensorKind,
    pub id: String,
    pub year: i32,
    pub month: u32,
}

impl ObjectKeyRecord {
    pub fn file_name(&self) -> String {
        format!("R{:02}_{}.csv", self.month, self.id)
    }

    /// Local destination mirroring the remote key layout:
    /// `{dest}/{kind}/{id}/{year}/{month}/R{month}_{id}.csv`.
    pub fn local_path(&self, dest: &Utf8Path) -> Utf8PathBuf {
        dest.join(self.kind.key_prefix())
            .join(&self.id)
            .join(self.year.to_string())
            .join(format!("{:02}", self.month))
            .join(self.file_name())
    }
}

/// Emits one record per (month, identifier) pair, months outer, identifiers
/// inner, so output order is fully determined by input order. No dedup.
pub fn generate_keys(
    months: &[(i32, u32)],
    ids: &[String],
    kind: SensorKind,
) -> Vec<ObjectKeyRecord> {
    let mut records = Vec::with_capacity(months.len() * ids.len());
    for &(year, month) in months {
        for id in ids {
            let key = format!(
                "{}/calibrated/15min/{id}/{year}/{month:02}/R{month:02}_{id}.csv",
                kind.key_prefix()
            );
            records.push(ObjectKeyRecord {
                key,
                kind,
                id: id.clone(),
                year,
                month,
            });
        }
    }
    records
}
