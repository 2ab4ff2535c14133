use crate::modules::lookup::{DetailRecord, MatchResult};
use crate::shared::errors::AppResult;
use log::info;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Write the reviews of every matched business as plain text, in the order given
///
/// Results without a detail record are skipped.
pub fn write_reviews<W: Write>(mut writer: W, results: &[MatchResult]) -> AppResult<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(writer, "{}", rule)?;
    writeln!(writer, "RECENT REVIEWS")?;
    writeln!(writer, "{}\n", rule)?;
    writeln!(writer, "NOTE: Google's API does not provide access to all reviews.")?;
    writeln!(writer, "Only a small, non-paginated set (~5 reviews) is returned.\n")?;

    for detail in results.iter().filter_map(MatchResult::detail) {
        write_business(&mut writer, detail, &rule)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_business<W: Write>(writer: &mut W, detail: &DetailRecord, rule: &str) -> io::Result<()> {
    writeln!(writer, "\n{}", rule)?;
    writeln!(writer, "Business: {}", detail.name)?;
    writeln!(writer, "{}\n", rule)?;

    if detail.reviews.is_empty() {
        return writeln!(writer, "No reviews available.\n");
    }

    for (i, review) in detail.reviews.iter().enumerate() {
        writeln!(writer, "Review #{}:", i + 1)?;
        writeln!(writer, "  Author: {}", review.author)?;
        writeln!(
            writer,
            "  Rating: {} ({}/5)",
            "★".repeat(review.rating as usize),
            review.rating
        )?;
        writeln!(writer, "  Time: {}", review.relative_time)?;
        if !review.text.is_empty() {
            writeln!(writer, "  Review: {}", review.text)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_reviews_to_path(path: &Path, results: &[MatchResult]) -> AppResult<()> {
    let file = io::BufWriter::new(std::fs::File::create(path)?);
    write_reviews(file, results)?;
    info!("Reviews written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lookup::domain::{
        Candidate, ConfidenceLabel, Review, ScoredCandidate, Selection,
    };

    fn selection() -> Selection {
        Selection {
            chosen: ScoredCandidate {
                candidate: Candidate::new("p1", "Brite Nites"),
                score: 0.95,
            },
            confidence: ConfidenceLabel::Excellent,
            warning: None,
        }
    }

    fn matched(name: &str, reviews: Vec<Review>) -> MatchResult {
        let detail = DetailRecord {
            place_id: "p1".to_string(),
            name: name.to_string(),
            rating: Some(4.9),
            user_ratings_total: Some(88),
            maps_url: None,
            formatted_address: None,
            reviews,
        };
        MatchResult::matched(name, detail, selection())
    }

    fn output(results: &[MatchResult]) -> String {
        let mut buffer = Vec::new();
        write_reviews(&mut buffer, results).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_note_written_for_empty_batch() {
        let output = output(&[]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], "RECENT REVIEWS");
        assert!(output.contains("~5 reviews"));
        assert!(!output.contains("Business:"));
    }

    #[test]
    fn test_reviews_listed_per_business() {
        let reviews = vec![
            Review {
                author: "Jordan".to_string(),
                rating: 5,
                relative_time: "2 weeks ago".to_string(),
                text: "Great lights".to_string(),
                publish_time: None,
            },
            Review {
                author: "Anonymous".to_string(),
                rating: 3,
                relative_time: "a month ago".to_string(),
                text: String::new(),
                publish_time: None,
            },
        ];
        let output = output(&[matched("Brite Nites", reviews)]);

        assert!(output.contains("Business: Brite Nites\n"));
        assert!(output.contains(
            "Review #1:\n  Author: Jordan\n  Rating: ★★★★★ (5/5)\n  Time: 2 weeks ago\n  Review: Great lights\n"
        ));
        assert!(output.contains(
            "Review #2:\n  Author: Anonymous\n  Rating: ★★★ (3/5)\n  Time: a month ago\n\n"
        ));
    }

    #[test]
    fn test_business_without_reviews_and_failed_queries() {
        let results = vec![
            MatchResult::not_found("Nowhere Diner"),
            matched("Quiet Shop", vec![]),
        ];
        let output = output(&results);

        assert!(output.contains("Business: Quiet Shop\n"));
        assert!(output.contains("No reviews available.\n"));
        assert!(!output.contains("Nowhere Diner"));
    }
}
