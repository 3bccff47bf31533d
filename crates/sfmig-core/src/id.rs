// Sandbox-local record Ids
use crate::record::SObjectType;

/// Generates an 18-character, Salesforce-shaped Id for `object`.
pub fn generate_record_id(object: SObjectType) -> String {
    let body = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", object.id_prefix(), &body[..15])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_distinct() {
        let first = generate_record_id(SObjectType::Contact);
        let second = generate_record_id(SObjectType::Contact);
        assert_eq!(first.len(), 18);
        assert!(first.starts_with("003"));
        assert_ne!(first, second);
        assert!(generate_record_id(SObjectType::Account).starts_with("001"));
    }
}
