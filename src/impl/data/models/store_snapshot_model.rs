use super::{
    entry_model::{EntryFieldsModel, EntryRecordModel},
    settings_model::SettingsModel,
    timestamp_model::TimestampModel,
};

const RECORD_ID_LEN: usize = 15;
const RECORD_ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Full content of a record store: the entries collection and the single
/// settings slot.
#[derive(Debug, Clone, Default, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct StoreSnapshotModel {
    #[serde(default)]
    pub entries: Vec<EntryRecordModel>,
    #[serde(default)]
    pub settings: Option<SettingsModel>,
    #[serde(default)]
    pub next_seq: u64,
}

impl StoreSnapshotModel {
    pub(crate) fn get_entry(&self, id: &str) -> Option<&EntryRecordModel> {
        self.entries.iter().find(|r| r.id == id)
    }

    pub(crate) fn create_entry(&mut self, fields: EntryFieldsModel) -> EntryRecordModel {
        let id = loop {
            self.next_seq += 1;
            let candidate = record_id(self.next_seq);
            if self.get_entry(&candidate).is_none() {
                break candidate;
            }
        };
        let now = TimestampModel::now();
        let record = EntryRecordModel {
            id,
            fields,
            created: now,
            updated: now,
        };
        self.entries.push(record.clone());
        record
    }

    pub(crate) fn update_entry(
        &mut self,
        id: &str,
        fields: EntryFieldsModel,
    ) -> Option<EntryRecordModel> {
        let record = self.entries.iter_mut().find(|r| r.id == id)?;
        record.fields = fields;
        record.updated = TimestampModel::now();
        Some(record.clone())
    }

    pub(crate) fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        self.entries.len() != before
    }
}

/// Base-36 encoding of `seq`, zero-padded to the record id length.
fn record_id(mut seq: u64) -> String {
    let mut id = [b'0'; RECORD_ID_LEN];
    for slot in id.iter_mut().rev() {
        *slot = RECORD_ID_ALPHABET[(seq % 36) as usize];
        seq /= 36;
        if seq == 0 {
            break;
        }
    }
    String::from_utf8_lossy(&id).into_owned()
}
