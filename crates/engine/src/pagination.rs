//! Skip/limit pagination from loosely typed query parameters.

/// Page size used when `limit` is missing or unusable.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size a client may ask for.
pub const MAX_LIMIT: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

/// Map `page`/`limit` query values to a skip/limit pair.
///
/// Never fails: anything missing, non-numeric or out of range falls back to
/// page 1 and [`DEFAULT_LIMIT`].
pub fn paginate(page: Option<&str>, limit: Option<&str>) -> Page {
    let page = page.and_then(parse_positive).unwrap_or(1);
    let limit = limit
        .and_then(parse_positive)
        .filter(|limit| *limit <= MAX_LIMIT)
        .unwrap_or(DEFAULT_LIMIT);

    Page {
        skip: (page - 1).saturating_mul(limit),
        limit,
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    let value = value.trim();
    let parsed = match value.parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            let float = value.parse::<f64>().ok()?;
            if !float.is_finite() || float.fract() != 0.0 || float < 1.0 || float > u64::MAX as f64
            {
                return None;
            }
            float as u64
        }
    };

    (parsed >= 1).then_some(parsed)
}
