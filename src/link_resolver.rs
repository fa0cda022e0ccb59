use anyhow::Context;
use scraper::{Html, Selector};
use url::Url;

use crate::no_pdf_link_error::NoPdfLinkFoundError;
use crate::text_manipulators::extract_text;

/// A PDF anchor pulled off the listing page. The href may be relative and
/// is only resolved against the page URL once a candidate has been chosen.
#[derive(Debug)]
struct LinkCandidate {
    href: String,
    text: String,
}

impl LinkCandidate {
    fn contains(&self, needle: &str) -> bool {
        self.href.to_lowercase().contains(needle) || self.text.to_lowercase().contains(needle)
    }
}

/// Picks the timetable PDF for `(year, month)` out of the listing page.
///
/// Candidates are every anchor whose href ends in `.pdf`, in document
/// order. Selection priority: a candidate carrying the canonical
/// `PrayerTimetable<MonthName><year>.pdf` filename, else one carrying the
/// month's name, else the first candidate. All comparisons are
/// case-insensitive over both the href and the link text. An empty
/// candidate set fails with [`NoPdfLinkFoundError`].
pub fn resolve_pdf_link(
    listing_html: &str,
    page_url: &Url,
    year: i32,
    month: u32,
) -> anyhow::Result<Url> {
    let pdf_anchor_selector = Selector::parse("a[href$='.pdf']").expect("pdf anchor selector to parse");
    let document = Html::parse_document(listing_html);
    let candidates: Vec<LinkCandidate> = document
        .select(&pdf_anchor_selector)
        .filter_map(|node| {
            node.value().attr("href").map(|href| LinkCandidate {
                href: href.to_string(),
                text: extract_text(node),
            })
        })
        .collect();

    if candidates.is_empty() {
        return Err(NoPdfLinkFoundError.into());
    }

    let month_name = month_name(month)?.to_lowercase();
    let canonical_file_name = format!("prayertimetable{month_name}{year}.pdf");

    let chosen = candidates
        .iter()
        .find(|candidate| candidate.contains(&canonical_file_name))
        .or_else(|| candidates.iter().find(|candidate| candidate.contains(&month_name)))
        .unwrap_or(&candidates[0]);

    page_url.join(&chosen.href).with_context(|| {
        format!("could not resolve PDF link {} against {page_url}", chosen.href)
    })
}

fn month_name(month: u32) -> anyhow::Result<&'static str> {
    let month = u8::try_from(month)
        .ok()
        .and_then(|number| chrono::Month::try_from(number).ok())
        .with_context(|| format!("month number out of range: {month}"))?;
    Ok(month.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_page() -> Url {
        Url::parse("https://www.masjidibrahim.co.uk/prayer-timetable/").unwrap()
    }

    fn page_with_links(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!("<a href=\"{href}\">timetable</a>"))
            .collect();
        format!("<html><body>{anchors}</body></html>")
    }

    #[test]
    fn prefers_the_exact_canonical_filename_over_earlier_candidates() {
        let html = page_with_links(&["/files/Other.pdf", "/files/PrayerTimetableMarch2025.pdf"]);
        let resolved = resolve_pdf_link(&html, &listing_page(), 2025, 3).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.masjidibrahim.co.uk/files/PrayerTimetableMarch2025.pdf"
        );
    }

    #[test]
    fn falls_back_to_a_month_name_match() {
        let html = page_with_links(&["/files/Other.pdf", "/files/march-iqamah.pdf"]);
        let resolved = resolve_pdf_link(&html, &listing_page(), 2025, 3).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.masjidibrahim.co.uk/files/march-iqamah.pdf"
        );
    }

    #[test]
    fn falls_back_to_the_first_candidate_in_document_order() {
        let html = page_with_links(&["/files/First.pdf", "/files/Second.pdf"]);
        let resolved = resolve_pdf_link(&html, &listing_page(), 2025, 3).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.masjidibrahim.co.uk/files/First.pdf"
        );
    }

    #[test]
    fn matches_on_the_link_text_as_well_as_the_href() {
        let html = "<a href=\"/files/a1.pdf\">Other</a>\
                    <a href=\"/files/a2.pdf\">PrayerTimetableMarch2025.pdf</a>";
        let resolved = resolve_pdf_link(html, &listing_page(), 2025, 3).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.masjidibrahim.co.uk/files/a2.pdf"
        );
    }

    #[test]
    fn absolute_hrefs_are_returned_unchanged() {
        let html = page_with_links(&["https://cdn.example.com/PrayerTimetableMarch2025.pdf"]);
        let resolved = resolve_pdf_link(&html, &listing_page(), 2025, 3).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://cdn.example.com/PrayerTimetableMarch2025.pdf"
        );
    }

    #[test]
    fn anchors_without_a_pdf_href_are_not_candidates() {
        let html = "<a href=\"/files/timetable.html\">March</a>";
        let error = resolve_pdf_link(html, &listing_page(), 2025, 3).unwrap_err();
        assert!(error.downcast_ref::<NoPdfLinkFoundError>().is_some());
    }

    #[test]
    fn an_empty_page_fails_with_no_pdf_link_found() {
        let error = resolve_pdf_link("<html></html>", &listing_page(), 2025, 3).unwrap_err();
        assert!(error.downcast_ref::<NoPdfLinkFoundError>().is_some());
    }
}
