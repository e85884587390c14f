//! The closed set of scalar conversions behind the typed accessors, plus the
//! small fixed-size vector types returned by `get_vec2/3/4`.

use crate::error::{Error, Result};

/// Text-to-value rule for one scalar kind.
///
/// The set of implementations is fixed at compile time: `bool`, the integer
/// widths, `f32`/`f64`, and `String`. Numeric conversion of malformed text is
/// a hard error; it never falls back to a default.
pub trait FromScalar: Sized {
    fn from_scalar(raw: &str) -> Result<Self>;
}

impl FromScalar for bool {
    /// `true`, `on`, and `yes` are true; any other text is false.
    fn from_scalar(raw: &str) -> Result<Self> {
        Ok(matches!(raw, "true" | "on" | "yes"))
    }
}

impl FromScalar for String {
    fn from_scalar(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

macro_rules! numeric_from_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl FromScalar for $ty {
            fn from_scalar(raw: &str) -> Result<Self> {
                raw.parse::<$ty>().map_err(|_| Error::Convert {
                    value: raw.to_string(),
                    target: stringify!($ty),
                })
            }
        }
    )*};
}

numeric_from_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_literals() {
        assert_eq!(bool::from_scalar("true").unwrap(), true);
        assert_eq!(bool::from_scalar("on").unwrap(), true);
        assert_eq!(bool::from_scalar("yes").unwrap(), true);
        assert_eq!(bool::from_scalar("false").unwrap(), false);
        assert_eq!(bool::from_scalar("1").unwrap(), false);
        assert_eq!(bool::from_scalar("On").unwrap(), false);
    }

    #[test]
    fn numeric_failure_is_hard() {
        assert!(i32::from_scalar("12").is_ok());
        assert!(matches!(
            i32::from_scalar("12x"),
            Err(Error::Convert { target: "i32", .. })
        ));
        assert!(u8::from_scalar("-1").is_err());
        assert!(f64::from_scalar("2.5e3").is_ok());
    }
}
