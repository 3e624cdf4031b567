use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;

use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A floating point [`Cost`].
///
/// Totally ordered through [`OrderedFloat`], with `+inf` as the unreached
/// cost. Float addition already saturates there, so `saturating_add` is plain
/// addition.
///
/// NaN sorts above `+inf` and would look reachable, graphs must not produce it.
#[derive(Copy, Clone, Default, Debug, derive_more::Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }
    pub fn from_ordered_float(f: OrderedFloat<F>) -> Self {
        Self(f)
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self::new(F::infinity())
    }

    #[inline(always)]
    pub fn get(&self) -> F {
        self.0.into_inner()
    }
}

impl<F> Cost for FloatCost<F> where F: FloatCore + Debug + Display {}

impl<F: FloatCore> From<F> for FloatCost<F> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

macro_rules! forward_float_op {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl<F: FloatCore> std::ops::$trait for FloatCost<F> {
                type Output = Self;
                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    Self(std::ops::$trait::$method(self.0, rhs.0))
                }
            }
        )*
    };
}
forward_float_op!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);

impl<F: FloatCore> std::ops::AddAssign for FloatCost<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: FloatCore> SaturatingAdd for FloatCost<F> {
    #[inline(always)]
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl<F: FloatCore> Zero for FloatCost<F> {
    fn zero() -> Self {
        Self::new(F::zero())
    }
    fn is_zero(&self) -> bool {
        self.get().is_zero()
    }
}

impl<F: FloatCore> One for FloatCost<F> {
    fn one() -> Self {
        Self::new(F::one())
    }
}

impl<F: FloatCore> UpperBounded for FloatCost<F> {
    fn max_value() -> Self {
        Self::infinity()
    }
}

// Derives would require `F: Eq`, which floats aren't.
impl<F: FloatCore> PartialEq for FloatCost<F> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<F: FloatCore> Eq for FloatCost<F> {}
impl<F: FloatCore> PartialOrd for FloatCost<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: FloatCore> Ord for FloatCost<F> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(FloatCost::new(0.0f32).is_zero());
        assert!(FloatCost::from_ordered_float(OrderedFloat(0.0f32)).is_zero());
        assert!(!FloatCost::<f32>::one().is_zero());
    }

    #[test]
    fn order() {
        assert!(FloatCost::new(0.0f32) <= FloatCost::new(0.0f32));
        assert_eq!(FloatCost::new(0.0f32), FloatCost::from(0.0f32));
        assert!(FloatCost::new(1.5f64) < FloatCost::infinity());
        assert!(FloatCost::new(-0.5f64) < FloatCost::zero());
    }

    #[test]
    fn arithmetic() {
        let mut f = FloatCost::new(0.0f32);
        f += FloatCost::new(1.0f32);
        f += FloatCost::new(1.0f32);
        assert_eq!(f, FloatCost::new(2.0f32));
        assert_eq!((f * f - FloatCost::one()).get(), 3.0);
        assert_eq!((f / FloatCost::new(4.0)).get(), 0.5);
        f += FloatCost::infinity();
        assert_eq!(f, FloatCost::max_value());
    }

    #[test]
    fn infinity_is_the_unreached_cost() {
        let inf = FloatCost::<f64>::infinite();
        assert!(!inf.valid());
        assert!(FloatCost::new(1e300f64).valid());
        assert_eq!(inf.saturating_add(&FloatCost::new(1.0)), inf);
        assert_eq!(inf.to_string(), "inf");
    }
}
