//! Watermark and filename conventions for rendered quotes.

use crate::errors::{QuoteError, Result};
use crate::version::metadata::QuoteStatus;
use crate::version::tag::VersionTag;
use chrono::{DateTime, Utc};
use energen_core_types::BidNumber;
use serde::Serialize;

/// Stamp specification handed to the PDF renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkSpec {
    pub text: String,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    /// Counter-clockwise rotation in degrees
    pub rotation_degrees: f32,
    /// CSS hex color
    pub color: String,
}

/// Watermark for a quote status.
///
/// Drafts get a translucent diagonal "DRAFT" stamp; superseded copies get
/// "SUPERSEDED BY v{X.Y}" (or a bare "SUPERSEDED" when the replacing
/// version was not recorded); official quotes render clean.
pub fn watermark(status: QuoteStatus, superseded_by: Option<&VersionTag>) -> Option<WatermarkSpec> {
    match status {
        QuoteStatus::Draft => Some(WatermarkSpec {
            text: "DRAFT".to_string(),
            opacity: 0.15,
            rotation_degrees: 45.0,
            color: "#808080".to_string(),
        }),
        QuoteStatus::Superseded => {
            let text = match superseded_by {
                Some(version) => format!("SUPERSEDED BY {}", version.as_string()),
                None => "SUPERSEDED".to_string(),
            };
            Some(WatermarkSpec {
                text,
                opacity: 0.20,
                rotation_degrees: 45.0,
                color: "#cc0000".to_string(),
            })
        }
        QuoteStatus::Official => None,
    }
}

/// Build the PDF filename for a quote.
///
/// Drafts embed the full creation timestamp (drafts are transient, their
/// names intentionally non-reproducible across saves). Official and
/// superseded quotes embed the bid number, version string, and date.
///
/// # Errors
///
/// Returns `MissingBidNumber` for official/superseded status without a
/// bid number.
pub fn generate_filename(
    status: QuoteStatus,
    bid_number: Option<&BidNumber>,
    version: Option<&VersionTag>,
    date: DateTime<Utc>,
) -> Result<String> {
    match status {
        QuoteStatus::Draft => Ok(format!(
            "Energen_Quote_Draft_{}.pdf",
            date.format("%Y%m%d_%H%M%S")
        )),
        QuoteStatus::Official | QuoteStatus::Superseded => {
            let bid = bid_number.ok_or_else(|| QuoteError::MissingBidNumber {
                status: status.to_string(),
            })?;
            let version = version.copied().unwrap_or_else(VersionTag::initial);
            Ok(format!(
                "Energen_Bid_{}_{}_{}.pdf",
                bid,
                version.as_string(),
                date.format("%Y%m%d")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 15).unwrap()
    }

    #[test]
    fn test_draft_watermark_is_translucent_diagonal() {
        let spec = watermark(QuoteStatus::Draft, None).unwrap();
        assert_eq!(spec.text, "DRAFT");
        assert!(spec.opacity < 0.5);
        assert_ne!(spec.rotation_degrees, 0.0);
    }

    #[test]
    fn test_superseded_watermark_names_replacement() {
        let spec = watermark(
            QuoteStatus::Superseded,
            Some(&VersionTag { major: 2, minor: 0 }),
        )
        .unwrap();
        assert_eq!(spec.text, "SUPERSEDED BY v2.0");
    }

    #[test]
    fn test_official_has_no_watermark() {
        assert!(watermark(QuoteStatus::Official, None).is_none());
    }

    #[test]
    fn test_official_filename_layout() {
        let bid = BidNumber::new("BID-0001").unwrap();
        let name = generate_filename(
            QuoteStatus::Official,
            Some(&bid),
            Some(&VersionTag { major: 2, minor: 0 }),
            date(),
        )
        .unwrap();
        assert_eq!(name, "Energen_Bid_BID-0001_v2.0_20250601.pdf");
    }

    #[test]
    fn test_official_filename_defaults_version_to_v1_0() {
        let bid = BidNumber::new("BID-0001").unwrap();
        let name = generate_filename(QuoteStatus::Official, Some(&bid), None, date()).unwrap();
        assert_eq!(name, "Energen_Bid_BID-0001_v1.0_20250601.pdf");
    }

    #[test]
    fn test_draft_filename_embeds_timestamp() {
        let name = generate_filename(QuoteStatus::Draft, None, None, date()).unwrap();
        assert_eq!(name, "Energen_Quote_Draft_20250601_093015.pdf");
    }

    #[test]
    fn test_official_filename_without_bid_throws() {
        let err = generate_filename(QuoteStatus::Official, None, None, date()).unwrap_err();
        assert_eq!(
            err,
            QuoteError::MissingBidNumber {
                status: "official".into()
            }
        );
        let err = generate_filename(QuoteStatus::Superseded, None, None, date()).unwrap_err();
        assert!(matches!(err, QuoteError::MissingBidNumber { .. }));
    }
}
