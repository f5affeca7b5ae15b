use crate::data::X;
use crate::Result;

/// The detection model seen as an opaque function from a `[1, 3, H, W]` tensor to its raw output.
///
/// Implementations must be safe to call from several workers at once and deterministic for
/// fixed weights. Any failure should be reported as `SealError::Inference`.
pub trait ModelInvoker: Send + Sync {
    fn invoke(&self, input: &X) -> Result<X>;

    /// Class names embedded in the model, if it carries any.
    fn class_names(&self) -> Option<Vec<String>> {
        None
    }
}

impl<F> ModelInvoker for F
where
    F: Fn(&X) -> Result<X> + Send + Sync,
{
    fn invoke(&self, input: &X) -> Result<X> {
        self(input)
    }
}
