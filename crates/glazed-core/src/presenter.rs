/// Callbacks the front-end implements.
///
/// The installer never renders anything itself: it asks questions and reports
/// progress through this trait.
pub trait Presenter: Send + Sync {
    /// Asks a yes/no question. `true` means yes.
    fn confirm(&self, message: &str) -> bool;
    /// Status line while work is in progress.
    fn notify(&self, message: &str);
    fn report_error(&self, message: &str);
    fn report_success(&self, message: &str);
}

impl<P: Presenter + ?Sized> Presenter for &P {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn notify(&self, message: &str) {
        (**self).notify(message);
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message);
    }

    fn report_success(&self, message: &str) {
        (**self).report_success(message);
    }
}
