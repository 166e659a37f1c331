//! Rendering of rank distributions for people and machines.

use std::fmt::Write;

use crate::errors::Result;
use crate::pagerank::compare::Comparison;
use crate::pagerank::RankDistribution;

/// Title line followed by `  page: rank` rows sorted by page, four decimals.
pub fn render_text(title: &str, ranks: &RankDistribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for (page, rank) in ranks.sorted() {
        let _ = writeln!(out, "  {page}: {rank:.4}");
    }
    out
}

/// Both estimates of a comparison, sampling first.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = render_text(
        &format!("PageRank Results from Sampling (n = {})", comparison.samples),
        &comparison.sampled,
    );
    out.push_str(&render_text("PageRank Results from Iteration", &comparison.iterated));
    out
}

/// Pretty-printed JSON document of a comparison.
pub fn render_json(comparison: &Comparison) -> Result<String> {
    Ok(serde_json::to_string_pretty(comparison)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::csr::Corpus;

    fn comparison() -> Comparison {
        let corpus = Corpus::from_links(vec![("b.html", vec!["a.html"]), ("a.html", vec![])]);
        Comparison {
            samples: 4,
            iterations: 12,
            converged: true,
            sampled: RankDistribution::new(&corpus, vec![0.25, 0.75]),
            iterated: RankDistribution::new(&corpus, vec![1.0 / 3.0, 2.0 / 3.0]),
        }
    }

    #[test]
    fn test_text_sorted_four_decimals() {
        let text = render_text("Ranks", &comparison().iterated);

        assert_eq!(text, "Ranks\n  a.html: 0.6667\n  b.html: 0.3333\n");
    }

    #[test]
    fn test_comparison_blocks() {
        let text = render_comparison(&comparison());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "PageRank Results from Sampling (n = 4)");
        assert_eq!(lines[1], "  a.html: 0.7500");
        assert_eq!(lines[3], "PageRank Results from Iteration");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_json_document() {
        let json = render_json(&comparison()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["iterations"], 12);
        assert_eq!(value["sampled"]["b.html"], 0.25);
    }
}
