/// Costs of edges, paths and heuristic estimates.
///
/// `max_value()` stands for "infinite", the cost of a node that was not
/// reached yet. Additions saturate so "infinite" stays infinite.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::AddAssign
{
    /// Whether this is a finite cost.
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }

    #[inline(always)]
    fn infinite() -> Self {
        num_traits::bounds::UpperBounded::max_value()
    }
}

macro_rules! impl_unsigned_cost {
    ($($t:ty),*) => {
        $(impl Cost for $t {})*
    };
}

impl_unsigned_cost!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    use num_traits::SaturatingAdd;

    #[test]
    fn infinity_is_invalid() {
        assert!(!u32::infinite().valid());
        assert!(0u32.valid());
        assert!((u32::MAX - 1).valid());
    }

    #[test]
    fn infinity_saturates() {
        // The inherent integer method would shadow the trait one.
        assert_eq!(SaturatingAdd::saturating_add(&u32::infinite(), &7u32), u32::infinite());
        assert_eq!(SaturatingAdd::saturating_add(&3u64, &4u64), 7u64);
        assert_eq!(SaturatingAdd::saturating_add(&(u8::MAX - 1), &2u8), u8::infinite());
    }
}
