use kernel::KernelError;

/// Lifts a backend error into a kernel report, classifying it on the way.
pub trait ConvertError: Sized {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
