//! User application hooks

use crate::router::CommandContext;
use crate::setup::SetupWriter;

/// Application driven by the command router
///
/// `on_command` runs once per drained command; queries on the context
/// describe that command. `on_setup` runs inside the configuration burst of
/// the setup handshake; the default sends no configuration, which still
/// produces an empty (but well-formed) burst.
pub trait ControllerApp {
    /// Handle one drained command
    fn on_command(&mut self, cmd: &mut CommandContext<'_>);

    /// Send the button configuration
    fn on_setup(&mut self, _setup: &mut SetupWriter<'_>) {}
}

impl<T: ControllerApp + ?Sized> ControllerApp for &mut T {
    fn on_command(&mut self, cmd: &mut CommandContext<'_>) {
        (**self).on_command(cmd)
    }

    fn on_setup(&mut self, setup: &mut SetupWriter<'_>) {
        (**self).on_setup(setup)
    }
}

/// Adapter running a closure as the command handler
pub struct FnApp<F>(pub F);

impl<F> ControllerApp for FnApp<F>
where
    F: FnMut(&mut CommandContext<'_>),
{
    fn on_command(&mut self, cmd: &mut CommandContext<'_>) {
        (self.0)(cmd)
    }
}
