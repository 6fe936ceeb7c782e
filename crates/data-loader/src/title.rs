//! Title normalization.
//!
//! MovieLens titles carry the release year in parentheses:
//! "Toy Story (1995)". Matching user input against the catalog needs the
//! bare title, so the year is split out before records reach the index.

/// A raw title split into its bare title and optional year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTitle {
    pub title: String,
    pub year: Option<u16>,
}

/// Remove every parenthesized 4-digit group from `raw` and trim the rest.
///
/// The first such group becomes the year.
///
/// Example: "Toy Story (1995)" -> ("Toy Story", Some(1995))
///          "Movie Title" -> ("Movie Title", None)
pub fn normalize_title(raw: &str) -> NormalizedTitle {
    let mut title = String::with_capacity(raw.len());
    let mut year = None;
    let mut rest = raw;

    while let Some(start) = rest.find('(') {
        let candidate = &rest[start..];
        match parse_year_group(candidate) {
            Some(found) => {
                title.push_str(&rest[..start]);
                if year.is_none() {
                    year = Some(found);
                }
                // "(dddd)" is six ASCII bytes
                rest = &candidate[6..];
            }
            None => {
                title.push_str(&rest[..=start]);
                rest = &candidate[1..];
            }
        }
    }
    title.push_str(rest);

    NormalizedTitle {
        title: title.trim().to_string(),
        year,
    }
}

/// Parse "(dddd)" at the start of `s`.
fn parse_year_group(s: &str) -> Option<u16> {
    let bytes = s.as_bytes();
    if bytes.len() < 6 || bytes[0] != b'(' || bytes[5] != b')' {
        return None;
    }
    if !bytes[1..5].iter().all(u8::is_ascii_digit) {
        return None;
    }
    s[1..5].parse().ok()
}
