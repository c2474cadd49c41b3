use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeStringError {
    #[error("time must be written as HH:MM")]
    Format,
    #[error("hours must be between 0 and 23")]
    Hours,
    #[error("minutes must be between 0 and 59")]
    Minutes,
}

/// Converts a `HH:MM` string into minutes counted from midnight.
pub fn converter_time_string_to_minutes(time: &str) -> Result<u32, TimeStringError> {
    let (hours, minutes) = time.trim().split_once(':').ok_or(TimeStringError::Format)?;
    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;

    if hours > 23 {
        return Err(TimeStringError::Hours);
    }
    if minutes > 59 {
        return Err(TimeStringError::Minutes);
    }

    Ok(hours * 60 + minutes)
}

fn parse_component(value: &str) -> Result<u32, TimeStringError> {
    // `u32::from_str` accepts a leading `+` which is not a valid time
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeStringError::Format);
    }
    value.parse().map_err(|_| TimeStringError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_minutes() {
        assert_eq!(Ok(570), converter_time_string_to_minutes("09:30"));
        assert_eq!(Ok(0), converter_time_string_to_minutes("00:00"));
        assert_eq!(Ok(1439), converter_time_string_to_minutes("23:59"));
        assert_eq!(Ok(480), converter_time_string_to_minutes("8:00"));
    }

    #[test]
    fn test_rejects_malformed_strings() {
        assert_eq!(Err(TimeStringError::Format), converter_time_string_to_minutes("0930"));
        assert_eq!(Err(TimeStringError::Format), converter_time_string_to_minutes("ab:cd"));
        assert_eq!(Err(TimeStringError::Format), converter_time_string_to_minutes("+9:30"));
        assert_eq!(Err(TimeStringError::Format), converter_time_string_to_minutes(":30"));
        assert_eq!(Err(TimeStringError::Hours), converter_time_string_to_minutes("24:00"));
        assert_eq!(Err(TimeStringError::Minutes), converter_time_string_to_minutes("10:60"));
    }
}
