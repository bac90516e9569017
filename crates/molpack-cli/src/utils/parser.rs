use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid format for '{0}'. Expected 'NAME=VALUE' (e.g., 'EMC=EMC.xyz').")]
    MissingSeparator(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },

    #[error("Invalid count '{value}' for structure '{name}'. Expected a positive integer.")]
    InvalidCount { name: String, value: String },
}

/// Splits `NAME=VALUE` at the first `=`, trimming both sides.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "NAME",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "VALUE",
            input: input.to_string(),
        });
    }
    Ok((name, value))
}

/// Parses a `--structure NAME=FILE` argument.
pub fn parse_structure(input: &str) -> Result<(String, String), ParseError> {
    let (name, file) = parse_key_value(input)?;
    Ok((name.to_string(), file.to_string()))
}

/// Parses a `--count NAME=COUNT` argument. Zero is left for the model layer to reject.
pub fn parse_count(input: &str) -> Result<(String, u32), ParseError> {
    let (name, value) = parse_key_value(input)?;
    let count = value.parse::<u32>().map_err(|_| ParseError::InvalidCount {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    Ok((name.to_string(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_splits_at_first_equals() {
        assert_eq!(
            parse_structure("EMC=dir/a=b.xyz").unwrap(),
            ("EMC".to_string(), "dir/a=b.xyz".to_string())
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_count(" Li = 4 ").unwrap(),
            ("Li".to_string(), 4)
        );
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert_eq!(
            parse_structure("EMC.xyz"),
            Err(ParseError::MissingSeparator("EMC.xyz".to_string()))
        );
    }

    #[test]
    fn empty_components_are_rejected() {
        assert!(matches!(
            parse_structure("=EMC.xyz"),
            Err(ParseError::EmptyComponent { component: "NAME", .. })
        ));
        assert!(matches!(
            parse_count("EMC="),
            Err(ParseError::EmptyComponent { component: "VALUE", .. })
        ));
    }

    #[test]
    fn non_numeric_and_negative_counts_are_rejected() {
        for bad in ["EMC=two", "EMC=-3", "EMC=1.5"] {
            assert!(matches!(
                parse_count(bad),
                Err(ParseError::InvalidCount { .. })
            ));
        }
    }

    #[test]
    fn zero_count_parses() {
        assert_eq!(parse_count("EMC=0").unwrap(), ("EMC".to_string(), 0));
    }
}
