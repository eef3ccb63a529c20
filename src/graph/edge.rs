use super::VertexId;
use num_traits::CheckedAdd;

/// Handle for an edge slot, i.e. an ordered pair of vertex handles.
///
/// An `EdgeId` stays meaningful after the edge is removed, since the slot is
/// only tombstoned, but it goes stale together with its endpoints.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub source: VertexId,
    pub sink: VertexId,
}

/// A present edge, borrowed from its graph.
#[derive(Debug, PartialEq, Eq)]
pub struct EdgeRef<'a, K, E> {
    pub id: EdgeId,
    pub source: &'a K,
    pub sink: &'a K,
    pub payload: &'a E,
}

impl<'a, K, E> Clone for EdgeRef<'a, K, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, E> Copy for EdgeRef<'a, K, E> {}

/// Edge payloads which carry an additive weight.
///
/// Sums of weights are checked; an overflowing sum is never reported.
pub trait Weighted {
    type Weight: Copy + Ord + Default + CheckedAdd + std::fmt::Debug;

    fn weight(&self) -> Self::Weight;
}

/// Edge payloads which carry a bandwidth besides their weight.
pub trait Bandwidthed: Weighted {
    fn bandwidth(&self) -> Self::Weight;
}

macro_rules! plain_weight {
    ($($t:ty),*) => {
        $(
            impl Weighted for $t {
                type Weight = $t;

                fn weight(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

plain_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Payload of the extended variant: a weight and a bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Link<W> {
    pub weight: W,
    pub bandwidth: W,
}

impl<W> Link<W> {
    pub fn new(weight: W, bandwidth: W) -> Self {
        Self { weight, bandwidth }
    }
}

impl<W> Weighted for Link<W>
where
    W: Copy + Ord + Default + CheckedAdd + std::fmt::Debug,
{
    type Weight = W;

    fn weight(&self) -> W {
        self.weight
    }
}

impl<W> Bandwidthed for Link<W>
where
    W: Copy + Ord + Default + CheckedAdd + std::fmt::Debug,
{
    fn bandwidth(&self) -> W {
        self.bandwidth
    }
}
