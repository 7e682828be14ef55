//! Grammar for the literal values found in annotation fields.
//!
//! Fields are cut out by the [`splitter`](crate::splitter) first; the
//! parsers here read one complete field each: numbers, booleans, points,
//! extents, point lists and color triples. Each public function returns
//! `None` unless the whole field matched.

use winnow::{
    Parser as _,
    ascii::{float, multispace0},
    combinator::{alt, delimited, separated, separated_pair},
    error::{ContextError, ErrMode},
};

use modicon_core::geometry::{Extent, Point};

type IResult<O> = Result<O, ErrMode<ContextError>>;

/// A finite real number such as `-100`, `0.25` or `1e-3`.
pub fn parse_number(text: &str) -> Option<f64> {
    number.parse(text).ok()
}

/// `true` or `false`.
pub fn parse_bool(text: &str) -> Option<bool> {
    boolean.parse(text).ok()
}

/// `{x, y}`.
pub fn parse_point(text: &str) -> Option<Point> {
    point.parse(text).ok()
}

/// `{{x1, y1}, {x2, y2}}`.
pub fn parse_extent(text: &str) -> Option<Extent> {
    extent.parse(text).ok()
}

/// `{{x, y}, ...}`, possibly empty.
pub fn parse_points(text: &str) -> Option<Vec<Point>> {
    point_list.parse(text).ok()
}

/// `{r, g, b}` with the raw channel values.
///
/// Channels are not range-checked here: `{-1,-1,-1}` is how an unset text
/// color is written.
pub fn parse_triple(text: &str) -> Option<[f64; 3]> {
    triple.parse(text).ok()
}

fn number(input: &mut &str) -> IResult<f64> {
    delimited(
        multispace0,
        float.verify(|value: &f64| value.is_finite()),
        multispace0,
    )
    .parse_next(input)
}

fn boolean(input: &mut &str) -> IResult<bool> {
    delimited(
        multispace0,
        alt(("true".value(true), "false".value(false))),
        multispace0,
    )
    .parse_next(input)
}

fn open_brace(input: &mut &str) -> IResult<char> {
    delimited(multispace0, '{', multispace0).parse_next(input)
}

fn close_brace(input: &mut &str) -> IResult<char> {
    delimited(multispace0, '}', multispace0).parse_next(input)
}

fn comma(input: &mut &str) -> IResult<char> {
    delimited(multispace0, ',', multispace0).parse_next(input)
}

fn point(input: &mut &str) -> IResult<Point> {
    delimited(open_brace, separated_pair(number, comma, number), close_brace)
        .map(|(x, y)| Point::new(x, y))
        .parse_next(input)
}

fn point_list(input: &mut &str) -> IResult<Vec<Point>> {
    delimited(open_brace, separated(0.., point, comma), close_brace).parse_next(input)
}

fn extent(input: &mut &str) -> IResult<Extent> {
    delimited(open_brace, separated_pair(point, comma, point), close_brace)
        .map(|(first, second)| Extent::new(first, second))
        .parse_next(input)
}

fn triple(input: &mut &str) -> IResult<[f64; 3]> {
    delimited(
        open_brace,
        (number, comma, number, comma, number),
        close_brace,
    )
    .map(|(r, _, g, _, b)| [r, g, b])
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("-100.0"), Some(-100.0));
        assert_eq!(parse_number(" 2 "), Some(2.0));
        assert_approx_eq!(f64, parse_number("1e-3").unwrap(), 0.001);
        assert_eq!(parse_number("0.25mm"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_point("{0, NaN}"), None);
        assert_eq!(parse_triple("{0, 1e999, 0}"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_parse_point_and_extent() {
        assert_eq!(parse_point("{0.0, -10}"), Some(Point::new(0.0, -10.0)));
        assert_eq!(parse_point("{1}"), None);
        assert_eq!(
            parse_extent("{{-100.0, 100.0}, {100.0, -100.0}}"),
            Some(Extent::new(Point::new(-100.0, 100.0), Point::new(100.0, -100.0)))
        );
        assert_eq!(parse_extent("{{0,0}}"), None);
    }

    #[test]
    fn test_parse_points() {
        let points = parse_points("{{-10, 0}, {0, 30},{25,-5}}").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(25.0, -5.0));
        assert_eq!(parse_points("{}"), Some(Vec::new()));
        assert_eq!(parse_points("{{0,0},}"), None);
    }

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("{0, 127, 255}"), Some([0.0, 127.0, 255.0]));
        assert_eq!(parse_triple("{-1,-1,-1}"), Some([-1.0, -1.0, -1.0]));
        assert_eq!(parse_triple("{0,0}"), None);
    }
}
