//! Pulls the tour announcement out of the page HTML.

use anyhow::Context;

/// Fixed text the page shows when no tour is listed. Not an error.
pub(crate) const NO_TOURS_SENTINEL: &str = "No upcoming tours";

const TOURS_SELECTOR: &str = "#tours";

/// Returns `None` when the page shows the "no upcoming tours" text,
/// `Some(Event)` when a band/city/date announcement is listed.
pub(crate) fn extract(html: &str) -> anyhow::Result<Option<crate::Event>> {
    let selector = scraper::Selector::parse(TOURS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("Invalid tours selector: {e}"))?;

    let document = scraper::Html::parse_document(html);
    let element = document
        .select(&selector)
        .next()
        .with_context(|| format!("Selector {TOURS_SELECTOR:?} matched nothing in page"))?;

    let text = element.text().collect::<String>();
    let text = text.trim();

    if text == NO_TOURS_SENTINEL {
        return Ok(None);
    }

    Ok(Some(parse_event(text)?))
}

fn parse_event(text: &str) -> anyhow::Result<crate::Event> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();

    let [band, city, date] = fields.as_slice() else {
        anyhow::bail!("Expected 'band, city, date', got {text:?}");
    };

    if band.is_empty() || city.is_empty() || date.is_empty() {
        anyhow::bail!("Empty field in announcement {text:?}");
    }

    Ok(crate::Event {
        band: band.to_string(),
        city: city.to_string(),
        date: date.to_string(),
    })
}
