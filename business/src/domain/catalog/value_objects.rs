use super::errors::CatalogError;

/// A non-negative amount of money kept as a fixed-point string with exactly
/// two fraction digits (e.g. `"19.99"`).
///
/// The string form is the canonical representation; it is what gets
/// persisted and compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Price(String);

impl Price {
    /// Parses free-form user input into a canonical price.
    ///
    /// Every character that is not an ASCII digit or `.` is stripped, only
    /// the first decimal point counts, and the fraction is cut to two
    /// digits and padded (`"1234.5"` becomes `"1234.50"`). Input without a
    /// single digit is rejected, as are amounts whose cent value does not
    /// fit in a `u64`. Negative amounts cannot survive sanitization.
    pub fn parse(input: &str) -> Result<Self, CatalogError> {
        let sanitized: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        let (int_digits, frac_digits) = match sanitized.split_once('.') {
            Some((int_part, rest)) => {
                let frac: String = rest.chars().filter(char::is_ascii_digit).take(2).collect();
                (int_part.to_string(), frac)
            }
            None => (sanitized, String::new()),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(CatalogError::PriceInvalid);
        }

        let int_value: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| CatalogError::PriceInvalid)?
        };
        let frac_value: u64 = match frac_digits.len() {
            0 => 0,
            1 => frac_digits.parse::<u64>().map_err(|_| CatalogError::PriceInvalid)? * 10,
            _ => frac_digits.parse().map_err(|_| CatalogError::PriceInvalid)?,
        };
        let cents = int_value
            .checked_mul(100)
            .and_then(|total| total.checked_add(frac_value))
            .ok_or(CatalogError::PriceInvalid)?;

        Ok(Self(format!("{}.{:02}", cents / 100, cents % 100)))
    }

    /// Constructor for price text already persisted in durable storage
    /// (no validation).
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the canonical price text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value in cents, or `None` when the stored text is not in
    /// canonical fixed-point form.
    pub fn cents(&self) -> Option<u64> {
        let (int_digits, frac_digits) = self.0.split_once('.')?;
        if frac_digits.len() != 2 {
            return None;
        }
        let int_value: u64 = int_digits.parse().ok()?;
        let frac_value: u64 = frac_digits.parse().ok()?;
        int_value.checked_mul(100)?.checked_add(frac_value)
    }

    /// Display form used by the product list.
    ///
    /// Amounts of a million or more abbreviate to millions with at most one
    /// fraction digit (`"1m"`, `"1.5m"`); smaller amounts keep two fraction
    /// digits with a thousands-grouped integer part (`"1,234.50"`).
    /// Non-canonical stored text is returned unchanged.
    pub fn display_grouped(&self) -> String {
        let Some(cents) = self.cents() else {
            return self.0.clone();
        };

        const MILLION_CENTS: u64 = 100_000_000;
        if cents >= MILLION_CENTS {
            if cents % MILLION_CENTS == 0 {
                return format!("{}m", cents / MILLION_CENTS);
            }
            let tenths = (cents + 5_000_000) / 10_000_000;
            return format!("{}.{}m", tenths / 10, tenths % 10);
        }

        format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
