//! Cell type bounds.

/// A value that can be stored in a matrix cell.
///
/// `Default::default()` is the element's zero value: integers and floats get
/// `0`, `bool` gets `false`, object types get their own default (`String::new()`,
/// `None`, ...). Cells introduced by `extend`, `reshape` or the diagonal
/// constructors take this value unless a fill is supplied.
pub trait Element: Clone + Default {}

impl<T> Element for T where T: Clone + Default {}

/// Arithmetic bindings used by `add`, `subtract` and `multiply`.
///
/// Integer implementations wrap on overflow exactly like the type's native
/// `wrapping_*` operations (`i8::MAX + 1 == i8::MIN`); they never saturate
/// and never panic in debug builds.
pub trait Numeric: Element + Copy + PartialEq + num_traits::Zero {
    fn add_wrap(self, rhs: Self) -> Self;
    fn sub_wrap(self, rhs: Self) -> Self;
    fn mul_wrap(self, rhs: Self) -> Self;
}

macro_rules! impl_numeric_wrapping {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn add_wrap(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }
                #[inline]
                fn sub_wrap(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
                #[inline]
                fn mul_wrap(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn add_wrap(self, rhs: Self) -> Self {
                    self + rhs
                }
                #[inline]
                fn sub_wrap(self, rhs: Self) -> Self {
                    self - rhs
                }
                #[inline]
                fn mul_wrap(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )*
    };
}

impl_numeric_wrapping!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_element<T: Element>() {}
    fn assert_numeric<T: Numeric>() {}

    #[test]
    fn test_element_types() {
        assert_element::<bool>();
        assert_element::<char>();
        assert_element::<u8>();
        assert_element::<f64>();
        assert_element::<String>();
        assert_element::<Option<Vec<i32>>>();
    }

    #[test]
    fn test_numeric_types() {
        assert_numeric::<i8>();
        assert_numeric::<u16>();
        assert_numeric::<i64>();
        assert_numeric::<usize>();
        assert_numeric::<f32>();
        assert_numeric::<f64>();
    }

    #[test]
    fn test_zero_value_is_default() {
        assert_eq!(<i32 as Default>::default(), 0);
        assert!(!<bool as Default>::default());
        assert_eq!(<String as Default>::default(), "");
        assert_eq!(<f64 as num_traits::Zero>::zero(), 0.0);
    }

    #[test]
    fn test_signed_wraparound() {
        assert_eq!(127i8.add_wrap(1), -128);
        assert_eq!((-128i8).sub_wrap(1), 127);
        assert_eq!(i32::MAX.add_wrap(1), i32::MIN);
        assert_eq!(100i8.mul_wrap(2), -56);
    }

    #[test]
    fn test_unsigned_wraparound() {
        assert_eq!(255u8.add_wrap(1), 0);
        assert_eq!(0u16.sub_wrap(1), u16::MAX);
        assert_eq!(u64::MAX.mul_wrap(2), u64::MAX - 1);
    }

    #[test]
    fn test_float_arithmetic() {
        assert_eq!(1.5f64.add_wrap(2.25), 3.75);
        assert_eq!(1.0f32.sub_wrap(3.0), -2.0);
        assert_eq!(f64::MAX.mul_wrap(2.0), f64::INFINITY);
    }
}
