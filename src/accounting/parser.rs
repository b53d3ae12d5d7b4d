use std::str::FromStr;

use rust_decimal::Decimal;

use super::ParseError;

const MIN_TOKENS: usize = 3;

/// An accepted bulk-import line. Always recorded as a credit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub name: String,
    pub item: String,
    pub price: Decimal,
}

/// Parses `<Name> <Item words...> <Price>`.
///
/// The last token is always taken as the price, so an item whose final word is
/// numeric cannot be expressed: `Ali Sim Card 2 300` yields item `Sim Card 2`.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(ParseError::TooFewTokens);
    }

    let [name, item @ .., price] = tokens.as_slice() else {
        return Err(ParseError::TooFewTokens);
    };

    let price = parse_price(price)?;

    let item = item.join(" ");
    if item.is_empty() {
        return Err(ParseError::EmptyItem);
    }

    Ok(ParsedLine {
        name: name.to_string(),
        item,
        price,
    })
}

/// Accepts plain decimals (`200`, `-5`, `12.50`) and scientific notation (`1e3`).
/// Negative amounts are not rejected here. Magnitudes beyond `Decimal::MAX`
/// (about 7.9e28) are not representable and fail as `InvalidPrice`.
pub fn parse_price(token: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .map_err(|_| ParseError::InvalidPrice(token.to_string()))
}
