use crate::core::errors::RoomshareError;
use crate::core::verification::DocumentType;

#[test]
fn test_license_format() {
    assert!(DocumentType::License.is_valid("AB1234567890"));
    assert!(DocumentType::License.is_valid("mh12ab3456789"));
    assert!(!DocumentType::License.is_valid("AB12345"));
    assert!(!DocumentType::License.is_valid("AB-1234567890"));
}

#[test]
fn test_voter_format() {
    assert!(!DocumentType::Voter.is_valid("1234567"));
    assert!(DocumentType::Voter.is_valid("ABC1234567"));
    assert!(!DocumentType::Voter.is_valid("ABC12345678901"));
}

#[test]
fn test_aadhaar_format() {
    assert!(DocumentType::Aadhaar.is_valid("123456789012"));
    assert!(!DocumentType::Aadhaar.is_valid("1234567890AB"));
    assert!(!DocumentType::Aadhaar.is_valid("12345678901"));
}

#[test]
fn test_pan_format() {
    assert!(DocumentType::Pan.is_valid("ABCDE1234F"));
    assert!(!DocumentType::Pan.is_valid("abcde1234f"));
    assert!(!DocumentType::Pan.is_valid("ABCD1234EF"));
}

#[test]
fn test_surrounding_whitespace_ignored() {
    assert!(DocumentType::Aadhaar.is_valid("  123456789012 "));
    assert!(DocumentType::Aadhaar.validate(" 123456789012\n").is_ok());
}

#[test]
fn test_validate_reports_format_hint() {
    let err = DocumentType::Aadhaar.validate("1234567890AB").unwrap_err();
    assert!(matches!(err, RoomshareError::InputFormat(DocumentType::Aadhaar)));
    assert_eq!(err.to_string(), "Invalid Aadhaar format. Use exactly 12 digits.");

    let err = DocumentType::Pan.validate("ABCD").unwrap_err();
    assert!(err.to_string().contains("ABCDE1234F"));
}

#[test]
fn test_validate_rejects_empty_number() {
    let err = DocumentType::License.validate("   ").unwrap_err();
    assert!(matches!(err, RoomshareError::InvalidInput(..)));
}

#[test]
fn test_document_type_wire_names() {
    let parsed: DocumentType = serde_json::from_str("\"aadhaar\"").unwrap();
    assert_eq!(parsed, DocumentType::Aadhaar);
    assert_eq!(serde_json::to_string(&DocumentType::Pan).unwrap(), "\"pan\"");
}
