use std::str::FromStr;
use std::time::Duration;

/// A duration written as `30s`, `2m`, `1h15m30s` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let num = current_number
                .parse::<u64>()
                .map_err(|_| format!("Missing number before unit '{}'", c))?;
            let unit_millis = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1000,
                'm' => 60_000,
                'h' => 3_600_000,
                'd' => 86_400_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_millis = accumulate(total_millis, num, unit_millis)?;
            current_number.clear();
            has_value = true;
        }

        // A trailing number without a unit counts as seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = accumulate(total_millis, num, 1000)?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

fn accumulate(total_millis: u64, num: u64, unit_millis: u64) -> std::result::Result<u64, String> {
    num.checked_mul(unit_millis)
        .and_then(|millis| total_millis.checked_add(millis))
        .ok_or_else(|| "Duration is too large".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Duration {
        s.parse::<HumanDuration>().unwrap().0
    }

    #[test]
    fn test_units() {
        assert_eq!(parse("30s"), Duration::from_secs(30));
        assert_eq!(parse("2m"), Duration::from_secs(120));
        assert_eq!(parse("1h15m30s"), Duration::from_secs(4530));
        assert_eq!(parse("1d"), Duration::from_secs(86_400));
        assert_eq!(parse("250ms"), Duration::from_millis(250));
        assert_eq!(parse("45"), Duration::from_secs(45));
        assert_eq!(parse("1m 5s"), Duration::from_secs(65));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
        assert!("10y".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(
            "18446744073709551615d".parse::<HumanDuration>(),
            Err("Duration is too large".to_string())
        );
        assert!("18446744073709551615ms1ms".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615".parse::<HumanDuration>().is_err());
        assert_eq!(parse("18446744073709551615ms"), Duration::from_millis(u64::MAX));
    }
}
