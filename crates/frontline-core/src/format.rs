//! Number formatting for compact HUD labels.

/// Formats a territory share (`0.0..=1.0`) as a short percentage.
///
/// Shares at or above 99.5% collapse to `"100%"`, shares below 0.01% to
/// `"0%"`. Below 0.1% one significant digit is kept, otherwise two.
pub fn format_percentage(fraction: f64) -> String {
    let perc = fraction * 100.0;
    if !perc.is_finite() {
        return "0%".to_string();
    }
    if perc >= 99.5 {
        return "100%".to_string();
    }
    if perc < 0.01 {
        return "0%".to_string();
    }
    if perc < 0.1 {
        return format!("{}%", to_precision(perc, 1));
    }
    format!("{}%", to_precision(perc, 2))
}

/// Fraction digits printed when reading a double's exact decimal expansion.
/// Far beyond where any double in the percentage range can differ from a
/// rounding tie.
const EXACT_DIGITS: usize = 60;

/// Fixed significant-digit rendering of a positive value, rounded half up on
/// its exact decimal expansion.
///
/// Only covers magnitudes where no exponent notation is needed
/// (`value < 10^digits`).
fn to_precision(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, value);
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return exact;
    };
    let mut point = int_part.len();
    let mut all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();

    let Some(first) = all.iter().position(|&d| d != b'0') else {
        return format!("{:.*}", digits.saturating_sub(1), 0.0);
    };
    let cut = (first + digits).min(all.len());
    let round_up = all.get(cut).is_some_and(|&d| d >= b'5');
    all.truncate(cut);

    if round_up {
        let mut index = cut;
        loop {
            if index == 0 {
                all.insert(0, b'1');
                point += 1;
                break;
            }
            index -= 1;
            if all[index] == b'9' {
                all[index] = b'0';
            } else {
                all[index] += 1;
                break;
            }
        }
    }

    // Rounding can carry into the next power of ten (9.96 -> 10).
    let first = all.iter().position(|&d| d != b'0').unwrap_or(0);
    #[allow(clippy::cast_possible_wrap)]
    let exponent = point as isize - first as isize - 1;
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let decimals = (digits as isize - 1 - exponent).max(0) as usize;

    all.resize(all.len().max(point + decimals), b'0');
    let int_digits = std::str::from_utf8(&all[..point]).unwrap_or("0");
    let int_digits = match int_digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    if decimals == 0 {
        return int_digits.to_string();
    }
    let frac_digits = std::str::from_utf8(&all[point..point + decimals]).unwrap_or("");
    format!("{int_digits}.{frac_digits}")
}

/// Abbreviates a count: `999`, `1.23K`, `12.3K`, `123K`, `1.23M`, `12.3M`.
///
/// Values are floored at each tier, never rounded up; negatives render as 0.
#[allow(clippy::cast_precision_loss)]
pub fn render_number(num: f64) -> String {
    let num = if num.is_finite() { num.max(0.0) } else { 0.0 };

    if num >= 10_000_000.0 {
        let value = (num / 100_000.0).floor() / 10.0;
        format!("{value:.1}M")
    } else if num >= 1_000_000.0 {
        let value = (num / 10_000.0).floor() / 100.0;
        format!("{value:.2}M")
    } else if num >= 100_000.0 {
        format!("{}K", (num / 1000.0).floor())
    } else if num >= 10_000.0 {
        let value = (num / 100.0).floor() / 10.0;
        format!("{value:.1}K")
    } else if num >= 1000.0 {
        let value = (num / 10.0).floor() / 100.0;
        format!("{value:.2}K")
    } else {
        format!("{}", num.floor())
    }
}

/// Renders a troop count stored at internal (10x) resolution.
#[allow(clippy::cast_precision_loss)]
pub fn render_troops(raw_troops: u64) -> String {
    render_number(raw_troops as f64 / 10.0)
}
