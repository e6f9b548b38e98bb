use serde::{Deserialize, Serialize};

/// Opaque job identifier, also the name of the job's output file.
pub type JobId = String;

/// A unit of work pulled off the queue: append `data` to the file for `job_id`.
///
/// Wire format is JSON. Producers may attach extra fields (delivery metadata,
/// tracing ids); decode ignores anything it does not recognize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub job_id: JobId,
    pub data: String,
}

impl WorkItem {
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("WorkItem is always serializable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_roundtrip() {
        let item = WorkItem {
            job_id: "job42".into(),
            data: "hello".into(),
        };
        let decoded = WorkItem::decode(&item.encode()).expect("decode err");
        assert_eq!(decoded, item);
    }

    #[test]
    fn decode_tolerates_extra_fields() {
        let payload = br#"{"job_id":"j1","data":"d","retries":3,"origin":"node-7"}"#;
        let item = WorkItem::decode(payload).expect("decode err");
        assert_eq!(item.job_id, "j1");
        assert_eq!(item.data, "d");
    }

    #[test]
    fn decode_rejects_missing_fields() {
        assert!(WorkItem::decode(br#"{"job_id":"j1"}"#).is_err());
        assert!(WorkItem::decode(br#"{"data":"d"}"#).is_err());
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(WorkItem::decode(b"not json at all").is_err());
    }
}
