//! Extraction of states, ranges and pagination from Correios result pages.

use crate::error::{RangeError, Result};
use crate::pagination::{PaginationCursor, DEFAULT_ROWS_PER_PAGE};
use crate::store::{LocationRanges, RangeEntry};
use brids_core::StateCode;
use brids_ids::CepKey;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Label of the row holding a municipality's complete range.
pub const MUNICIPALITY_TOTAL: &str = "Total do município";

const STATES_PAGE: &str = "state selector page";
const RANGES_PAGE: &str = "range result page";

/// Cells per result row: location, range, status, range type.
const CELLS_PER_ROW: usize = 4;

/// Hidden inputs of the "Proxima" form, in cursor field order.
const CURSOR_INPUTS: [&str; 5] = ["Localidade", "Bairro", "pagini", "pagfim", "qtdrow"];

/// What one result page contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangePage {
    pub ranges: LocationRanges,
    pub cursor: PaginationCursor,
}

/// Selectors for both pages, parsed on first use.
struct PageSelectors {
    state_select: Selector,
    option: Selector,
    range_table: Selector,
    cell: Selector,
    next_form: Selector,
    cursor_inputs: [(&'static str, Selector); 5],
}

static SELECTORS: OnceLock<PageSelectors> = OnceLock::new();

impl PageSelectors {
    fn get() -> Result<&'static Self> {
        if let Some(selectors) = SELECTORS.get() {
            return Ok(selectors);
        }
        let built = Self::build()?;
        Ok(SELECTORS.get_or_init(|| built))
    }

    fn build() -> Result<Self> {
        let [location, neighborhood, start, end, rows] = CURSOR_INPUTS;
        let input = |name: &'static str| -> Result<(&'static str, Selector)> {
            Ok((name, selector(RANGES_PAGE, &format!(r#"input[name="{name}"]"#))?))
        };

        Ok(Self {
            state_select: selector(STATES_PAGE, r#"select[name="UF"]"#)?,
            option: selector(STATES_PAGE, "option")?,
            range_table: selector(RANGES_PAGE, "table.tmptabela")?,
            cell: selector(RANGES_PAGE, "td")?,
            next_form: selector(RANGES_PAGE, r#"form[name="Proxima"]"#)?,
            cursor_inputs: [
                input(location)?,
                input(neighborhood)?,
                input(start)?,
                input(end)?,
                input(rows)?,
            ],
        })
    }
}

fn selector(page: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| RangeError::markup(page, format!("invalid selector {css:?}: {e}")))
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Parse the state codes offered by the `<select name="UF">` dropdown.
///
/// Options that are not two-letter codes (placeholders) are skipped.
pub fn parse_states(html: &str) -> Result<Vec<StateCode>> {
    let selectors = PageSelectors::get()?;
    let document = Html::parse_document(html);

    let select = document
        .select(&selectors.state_select)
        .next()
        .ok_or_else(|| RangeError::markup(STATES_PAGE, "no <select name=\"UF\"> found"))?;

    let mut states = Vec::new();
    for option in select.select(&selectors.option) {
        let text = text_of(&option);
        let label = text.trim();
        if label.is_empty() {
            continue;
        }
        match StateCode::new(label) {
            Ok(state) if !states.contains(&state) => states.push(state),
            Ok(_) => {}
            Err(_) => tracing::debug!("Skipping state option {:?}", label),
        }
    }

    if states.is_empty() {
        return Err(RangeError::markup(STATES_PAGE, "state list is empty"));
    }

    Ok(states)
}

/// Parse one result page: its municipality-level ranges and the cursor for
/// the next page.
pub fn parse_range_page(html: &str) -> Result<RangePage> {
    let selectors = PageSelectors::get()?;
    let document = Html::parse_document(html);

    let cursor = parse_cursor(&document, selectors)?;
    let mut ranges = LocationRanges::new();

    for table in document.select(&selectors.range_table) {
        // decorative tables
        if table.value().attr("style").is_some() {
            continue;
        }

        let mut row: Vec<String> = Vec::with_capacity(CELLS_PER_ROW);
        for (index, cell) in table.select(&selectors.cell).enumerate() {
            match index % CELLS_PER_ROW {
                // "Situação" is not used
                2 => {}
                3 => {
                    if text_of(&cell).trim() == MUNICIPALITY_TOTAL {
                        let (location, entry) = parse_row(&row)?;
                        ranges.push(location, entry);
                    }
                    row.clear();
                }
                _ => row.push(text_of(&cell)),
            }
        }
    }

    Ok(RangePage { ranges, cursor })
}

/// Turn `[location, "<low> a <high>"]` into a range entry.
fn parse_row(row: &[String]) -> Result<(String, RangeEntry)> {
    let [location, range] = row else {
        return Err(RangeError::markup(
            RANGES_PAGE,
            format!("expected location and range cells, got {row:?}"),
        ));
    };

    let bounds: Vec<&str> = range.trim().split(" a ").collect();
    let [low, high] = bounds.as_slice() else {
        return Err(RangeError::markup(
            RANGES_PAGE,
            format!("range {range:?} is not '<low> a <high>'"),
        ));
    };

    let parse = |cep: &str| {
        CepKey::parse(cep)
            .map_err(|e| RangeError::markup(RANGES_PAGE, format!("bad CEP in range {range:?}: {e}")))
    };

    Ok((
        location.trim().to_string(),
        RangeEntry::new(parse(*low)?, parse(*high)?),
    ))
}

/// Read the hidden inputs of the "Proxima" form, if the page has one.
fn parse_cursor(document: &Html, selectors: &PageSelectors) -> Result<PaginationCursor> {
    let form = document.select(&selectors.next_form).find(|form| {
        form.value()
            .attr("method")
            .is_some_and(|method| method.eq_ignore_ascii_case("post"))
    });

    let Some(form) = form else {
        return Ok(PaginationCursor::default());
    };

    let hidden = |(name, input_selector): &(&str, Selector)| -> Result<String> {
        form.select(input_selector)
            .find(|input| {
                input
                    .value()
                    .attr("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
            })
            .and_then(|input| input.value().attr("value"))
            .map(str::to_string)
            .ok_or_else(|| {
                RangeError::markup(
                    RANGES_PAGE,
                    format!("pagination form has no hidden {name} value"),
                )
            })
    };

    let [location, neighborhood, start, end, rows] = &selectors.cursor_inputs;
    let location = hidden(location)?;
    let neighborhood = hidden(neighborhood)?;
    let start = hidden(start)?;
    let end = hidden(end)?;
    let rows = hidden(rows)?;

    let rows_per_page = if rows.trim().is_empty() {
        DEFAULT_ROWS_PER_PAGE
    } else {
        rows.trim().parse().map_err(|_| {
            RangeError::markup(RANGES_PAGE, format!("qtdrow {rows:?} is not a number"))
        })?
    };

    Ok(PaginationCursor {
        rows_per_page,
        start,
        end,
        location,
        neighborhood,
    })
}
