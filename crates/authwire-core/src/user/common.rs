//! Common value messages shared by most requests and responses.

use crate::codec::{
    new_boxed, FieldDescriptor, FieldKind, FieldValue, FieldView, Message,
    MessageDescriptor,
};
use crate::error::DecodeError;
use crate::well_known::Timestamp;

// ── ObjectDetails ─────────────────────────────────────────────────────────────

/// Bookkeeping attached to every mutated resource: the event sequence the
/// change landed at, when it happened, and which organization owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDetails {
    /// Sequence of the last event applied to the resource.
    pub sequence: u64,
    /// When the resource last changed.
    pub change_date: Option<Timestamp>,
    /// Organization the resource belongs to.
    pub resource_owner: String,
}

pub(crate) static OBJECT_DETAILS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "sequence", FieldKind::Uint64),
    FieldDescriptor::optional(2, "changeDate", FieldKind::Timestamp),
    FieldDescriptor::singular(3, "resourceOwner", FieldKind::String),
];

pub(crate) static OBJECT_DETAILS_DESC: MessageDescriptor =
    MessageDescriptor::new("ObjectDetails", OBJECT_DETAILS_FIELDS, new_boxed::<ObjectDetails>);

impl Message for ObjectDetails {
    fn descriptor() -> &'static MessageDescriptor {
        &OBJECT_DETAILS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Uint64(self.sequence)),
            2 => self.change_date.map(FieldView::Timestamp),
            3 => Some(FieldView::Str(&self.resource_owner)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Uint64(v)) => self.sequence = v,
            (2, FieldValue::Timestamp(v)) => self.change_date = Some(v),
            (3, FieldValue::String(v)) => self.resource_owner = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ObjectDetails",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── ListDetails ───────────────────────────────────────────────────────────────

/// Pagination bookkeeping on list responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDetails {
    /// Total number of matching results, ignoring offset/limit.
    pub total_result: u64,
    /// Sequence the view had processed when the list was computed.
    pub processed_sequence: u64,
    /// When the view was last updated.
    pub timestamp: Option<Timestamp>,
}

pub(crate) static LIST_DETAILS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "totalResult", FieldKind::Uint64),
    FieldDescriptor::singular(2, "processedSequence", FieldKind::Uint64),
    FieldDescriptor::optional(3, "timestamp", FieldKind::Timestamp),
];

pub(crate) static LIST_DETAILS_DESC: MessageDescriptor =
    MessageDescriptor::new("ListDetails", LIST_DETAILS_FIELDS, new_boxed::<ListDetails>);

impl Message for ListDetails {
    fn descriptor() -> &'static MessageDescriptor {
        &LIST_DETAILS_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Uint64(self.total_result)),
            2 => Some(FieldView::Uint64(self.processed_sequence)),
            3 => self.timestamp.map(FieldView::Timestamp),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Uint64(v)) => self.total_result = v,
            (2, FieldValue::Uint64(v)) => self.processed_sequence = v,
            (3, FieldValue::Timestamp(v)) => self.timestamp = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ListDetails",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── ListQuery ─────────────────────────────────────────────────────────────────

/// Offset/limit window for list requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub offset: u64,
    pub limit: u32,
    /// Sort ascending instead of the default descending.
    pub asc: bool,
}

pub(crate) static LIST_QUERY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::singular(1, "offset", FieldKind::Uint64),
    FieldDescriptor::singular(2, "limit", FieldKind::Uint32),
    FieldDescriptor::singular(3, "asc", FieldKind::Bool),
];

pub(crate) static LIST_QUERY_DESC: MessageDescriptor =
    MessageDescriptor::new("ListQuery", LIST_QUERY_FIELDS, new_boxed::<ListQuery>);

impl Message for ListQuery {
    fn descriptor() -> &'static MessageDescriptor {
        &LIST_QUERY_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => Some(FieldView::Uint64(self.offset)),
            2 => Some(FieldView::Uint32(self.limit)),
            3 => Some(FieldView::Bool(self.asc)),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::Uint64(v)) => self.offset = v,
            (2, FieldValue::Uint32(v)) => self.limit = v,
            (3, FieldValue::Bool(v)) => self.asc = v,
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "ListQuery",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

// ── Organization ──────────────────────────────────────────────────────────────

/// Reference to an organization, by id or by registered domain.
///
/// At most one of the two fields is expected to be set; the codec carries
/// both independently and leaves exclusivity to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Organization {
    pub org_id: Option<String>,
    pub org_domain: Option<String>,
}

pub(crate) static ORGANIZATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::optional(1, "orgId", FieldKind::String),
    FieldDescriptor::optional(2, "orgDomain", FieldKind::String),
];

pub(crate) static ORGANIZATION_DESC: MessageDescriptor =
    MessageDescriptor::new("Organization", ORGANIZATION_FIELDS, new_boxed::<Organization>);

impl Message for Organization {
    fn descriptor() -> &'static MessageDescriptor {
        &ORGANIZATION_DESC
    }

    fn field(&self, number: u32) -> Option<FieldView<'_>> {
        match number {
            1 => self.org_id.as_deref().map(FieldView::Str),
            2 => self.org_domain.as_deref().map(FieldView::Str),
            _ => None,
        }
    }

    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        match (number, value) {
            (1, FieldValue::String(v)) => self.org_id = Some(v),
            (2, FieldValue::String(v)) => self.org_domain = Some(v),
            (number, _) => {
                return Err(DecodeError::UnexpectedValue {
                    message: "Organization",
                    field: number,
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_message, encode_message, message_from_json, message_to_json};
    use serde_json::json;

    #[test]
    fn test_object_details_round_trip() {
        let details = ObjectDetails {
            sequence: 4242,
            change_date: Some(Timestamp::new(1_714_560_000, 0)),
            resource_owner: "org-1".to_string(),
        };
        let decoded: ObjectDetails =
            decode_message(&encode_message(&details)).expect("decode failed");
        assert_eq!(decoded, details);
    }

    #[test]
    fn test_sequence_serializes_as_decimal_string() {
        // 2^53 + 1 is exactly where JSON numbers stop being trustworthy.
        let details = ObjectDetails {
            sequence: 9_007_199_254_740_993,
            ..Default::default()
        };
        let encoded = message_to_json(&details).expect("to_json failed");
        assert_eq!(encoded, json!({ "sequence": "9007199254740993" }));
        let decoded: ObjectDetails = message_from_json(&encoded).expect("from_json failed");
        assert_eq!(decoded, details);
    }

    #[test]
    fn test_change_date_appears_as_rfc3339() {
        let details = ObjectDetails {
            sequence: 1,
            change_date: Some(Timestamp::new(1_714_560_000, 0)),
            resource_owner: "org-1".to_string(),
        };
        let encoded = message_to_json(&details).expect("to_json failed");
        assert_eq!(
            encoded,
            json!({
                "sequence": "1",
                "changeDate": "2024-05-01T10:40:00Z",
                "resourceOwner": "org-1",
            })
        );
        let decoded: ObjectDetails = message_from_json(&encoded).expect("from_json failed");
        assert_eq!(decoded, details);
    }

    #[test]
    fn test_absent_change_date_stays_absent() {
        let details = ObjectDetails {
            sequence: 7,
            resource_owner: "org-1".to_string(),
            ..Default::default()
        };
        let decoded: ObjectDetails =
            decode_message(&encode_message(&details)).expect("decode failed");
        assert_eq!(decoded.change_date, None);
    }

    #[test]
    fn test_list_query_round_trip() {
        let query = ListQuery {
            offset: 100,
            limit: 25,
            asc: true,
        };
        let decoded: ListQuery = decode_message(&encode_message(&query)).expect("decode failed");
        assert_eq!(decoded, query);
    }

    #[test]
    fn test_organization_variants_are_independent() {
        let by_id = Organization {
            org_id: Some("org-1".to_string()),
            org_domain: None,
        };
        let by_domain = Organization {
            org_id: None,
            org_domain: Some("example.com".to_string()),
        };
        for organization in [by_id, by_domain] {
            let decoded: Organization =
                decode_message(&encode_message(&organization)).expect("decode failed");
            assert_eq!(decoded, organization);
        }
    }
}
