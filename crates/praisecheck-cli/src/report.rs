//! Ranked review output.

use std::io::Write;

use clap::ValueEnum;
use praisecheck_core::Review;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable listing
    Text,
    /// JSON array of ranked reviews
    Json,
}

#[derive(Serialize)]
struct RankedReview<'a> {
    rank: usize,
    #[serde(flatten)]
    review: &'a Review,
}

/// Writes `reviews`, already in rank order, to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON encoding fails.
pub fn write_report<W: Write>(
    out: &mut W,
    reviews: &[Review],
    rank_size: usize,
    format: ReportFormat,
) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => write_text(out, reviews, rank_size)?,
        ReportFormat::Json => write_json(out, reviews)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text<W: Write>(out: &mut W, reviews: &[Review], rank_size: usize) -> std::io::Result<()> {
    writeln!(
        out,
        "TOP {rank_size} rank of overly positive reviews using an over positive index\n"
    )?;
    for (i, review) in reviews.iter().enumerate() {
        writeln!(out, "Review {}", i + 1)?;
        writeln!(out, "Review author: {}", review.author)?;
        writeln!(out, "Review text {}", review.raw_text)?;
        writeln!(out, "Over positive index: {:.3}\n", review.positive_index)?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, reviews: &[Review]) -> anyhow::Result<()> {
    let ranked: Vec<RankedReview<'_>> = reviews
        .iter()
        .enumerate()
        .map(|(i, review)| RankedReview { rank: i + 1, review })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &ranked)?;
    writeln!(out)?;
    Ok(())
}
