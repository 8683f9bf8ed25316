//! Splitting of the report text into monthly sections.
//!
//! A section starts after a `"<Month> <Year> Agents"` marker and runs up to
//! the next marker, the terminator text or the end of the document,
//! whichever comes first.

use regex::CaptureMatches;

use crate::models::report::Month;
use crate::report::rules::patterns::MONTH_MARKER;

/// Lazy iterator over `(month, section text)` pairs in document order.
pub struct MonthSections<'a> {
    text: &'a str,
    terminator: &'a str,
    markers: CaptureMatches<'static, 'a>,
    /// Next marker already consumed from `markers`: month, body start.
    pending: Option<(Month, usize, usize)>,
}

/// Iterate the month sections of `text`.
///
/// An empty `terminator` disables terminator detection.
pub fn month_sections<'a>(text: &'a str, terminator: &'a str) -> MonthSections<'a> {
    MonthSections {
        text,
        terminator,
        markers: MONTH_MARKER.captures_iter(text),
        pending: None,
    }
}

impl<'a> MonthSections<'a> {
    /// Returns (month, marker start, body start).
    fn next_marker(&mut self) -> Option<(Month, usize, usize)> {
        self.markers.by_ref().find_map(|caps| {
            let marker = caps.get(0)?;
            let month = Month::from_name(&caps["month"])?;
            Some((month, marker.start(), marker.end()))
        })
    }
}

impl<'a> Iterator for MonthSections<'a> {
    type Item = (Month, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let (month, _, body_start) = match self.pending.take() {
            Some(marker) => marker,
            None => self.next_marker()?,
        };

        self.pending = self.next_marker();
        let body_end = self
            .pending
            .map(|(_, marker_start, _)| marker_start)
            .unwrap_or(self.text.len());

        let mut body = &self.text[body_start..body_end];
        if !self.terminator.is_empty() {
            if let Some(pos) = body.find(self.terminator) {
                body = &body[..pos];
            }
        }

        Some((month, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sections_keep_document_order() {
        let text = "Mars 2025 Agents A\nJanvier 2025 Agents B\nFévrier 2024 Agents C";
        let sections: Vec<_> = month_sections(text, "Cloture").collect();

        assert_eq!(
            sections,
            vec![
                (Month::Mars, " A\n"),
                (Month::Janvier, " B\n"),
                (Month::Fevrier, " C"),
            ]
        );
    }

    #[test]
    fn test_terminator_ends_section() {
        let text = "Juin 2025 Agents 12 14\nCloture\nAnnexe 99 100\nJuillet 2025 Agents 3";
        let sections: Vec<_> = month_sections(text, "Cloture").collect();

        assert_eq!(sections, vec![(Month::Juin, " 12 14\n"), (Month::Juillet, " 3")]);
    }

    #[test]
    fn test_empty_terminator_is_ignored() {
        let text = "Juin 2025 Agents a Cloture b";
        let sections: Vec<_> = month_sections(text, "").collect();
        assert_eq!(sections, vec![(Month::Juin, " a Cloture b")]);
    }

    #[test]
    fn test_marker_without_body() {
        let text = "Avril 2025 AgentsMai 2025 Agents\n1 2";
        let sections: Vec<_> = month_sections(text, "Cloture").collect();
        assert_eq!(sections, vec![(Month::Avril, ""), (Month::Mai, "\n1 2")]);
    }

    #[test]
    fn test_accentless_and_english_names() {
        let text = "Aout 2025 Agents x\nDecember 2025   Agents y";
        let months: Vec<Month> = month_sections(text, "Cloture").map(|(m, _)| m).collect();
        assert_eq!(months, vec![Month::Aout, Month::Decembre]);
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(month_sections("Rapport annuel", "Cloture").count(), 0);
    }
}
