//! Aadhaar card text extraction
//!
//! Turns raw OCR text (and any provider entities) into structured card
//! fields. Only the printed layout of the card is modelled; nothing here
//! verifies an identity.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::address::parse_address;
use crate::models::{ExtractedAadhaarData, OcrEntity};

/// Highest confidence reported for a real extraction
pub const MAX_OCR_CONFIDENCE: u8 = 95;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:Name|नाम)[:\s]*([A-Za-z\x{0900}-\x{097F}\s]+?)(?:\n|DOB|जन्म|Aadhaar|आधार|[0-9]{4})",
    )
    .expect("name pattern compiles")
});

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4}\s[0-9]{4}\s[0-9]{4})").expect("number pattern compiles"));

static DOB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:DOB|जन्म|Birth)[:\s]*([0-9]{2}/[0-9]{2}/[0-9]{4})")
        .expect("dob pattern compiles")
});

static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:Address|पता|S/O|D/O|W/O)[:\s]*(.+?)(?:PIN|पिन|Mobile|मोबाइल|$)")
        .expect("address pattern compiles")
});

/// Extract card fields from the OCR text of both sides.
///
/// Patterns run over the combined text; the address prefers the back side
/// when it has text. Entities fill in whatever the patterns missed.
pub fn extract_aadhaar_fields(
    front_text: &str,
    back_text: &str,
    entities: &[OcrEntity],
    today: NaiveDate,
) -> ExtractedAadhaarData {
    let combined = format!("{} {}", front_text, back_text).trim().to_string();

    let full_name = capture(&NAME_PATTERN, &combined)
        .or_else(|| entity_text(entities, &["PERSON", "NAME"]));
    let aadhaar_number = capture(&NUMBER_PATTERN, &combined);
    let date_of_birth =
        capture(&DOB_PATTERN, &combined).or_else(|| entity_text(entities, &["DATE"]));
    let address_source = if back_text.trim().is_empty() {
        combined.as_str()
    } else {
        back_text
    };
    let address = capture(&ADDRESS_PATTERN, address_source)
        .or_else(|| entity_text(entities, &["ADDRESS", "LOCATION"]));

    let found = [&full_name, &aadhaar_number, &date_of_birth, &address]
        .iter()
        .filter(|field| field.is_some())
        .count();
    let age = date_of_birth
        .as_deref()
        .and_then(|dob| age_from_dob(dob, today));
    let components = parse_address(address.as_deref().unwrap_or_default());

    ExtractedAadhaarData {
        full_name,
        aadhaar_number,
        date_of_birth,
        age,
        address,
        location: components.location,
        state: components.state,
        district: components.district,
        pincode: components.pincode,
        confidence: ocr_confidence(found, 4),
        raw_text: combined,
    }
}

/// Share of fields found as a percentage, capped at [`MAX_OCR_CONFIDENCE`]
pub fn ocr_confidence(found: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (found as f64 / total as f64) * 100.0;
    percent.min(MAX_OCR_CONFIDENCE as f64).round() as u8
}

/// Age in whole years on `today` for a `DD/MM/YYYY` or `YYYY-MM-DD` birth date
pub fn age_from_dob(dob: &str, today: NaiveDate) -> Option<u32> {
    let dob = dob.trim();
    let birth = NaiveDate::parse_from_str(dob, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(dob, "%Y-%m-%d"))
        .ok()?;

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn entity_text(entities: &[OcrEntity], types: &[&str]) -> Option<String> {
    entities
        .iter()
        .find(|entity| types.contains(&entity.entity_type.as_str()))
        .and_then(|entity| entity.mention_text.as_deref())
        .map(|text| text.trim().to_string())
}
