//! Composite termination condition (OR).
//!
//! Uses macro-generated tuple implementations so the combined condition keeps
//! its concrete types.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when ANY wrapped termination does.
///
/// # Examples
///
/// ```
/// use alloyforge_solver::termination::{NodeCountTermination, OrTermination, TimeTermination};
///
/// // Terminate after 30 seconds OR 1000 nodes
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
