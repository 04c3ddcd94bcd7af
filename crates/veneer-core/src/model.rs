use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime drives an **init -> view -> update** cycle: [`init`](Model::init)
/// builds the state, [`view`](Model::view) draws it, and every message from a
/// [`Subscription`] or [`Command`] goes through [`update`](Model::update).
/// After each update the runtime re-reads [`subscriptions`](Model::subscriptions)
/// and starts or stops sources accordingly.
///
/// # Example
///
/// ```rust,ignore
/// struct Form {
///     viewport: Viewport,
///     fruit: Select,
/// }
///
/// enum Msg {
///     Viewport(ViewportClass),
///     Fruit(select::Message),
/// }
///
/// impl Model for Form {
///     type Message = Msg;
///     type Flags = Viewport;
///
///     fn init(viewport: Viewport) -> (Self, Command<Msg>) {
///         let fruit = Select::new(options);
///         (Form { viewport, fruit }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Viewport(class) => self
///                 .fruit
///                 .update(select::Message::Viewport(class))
///                 .map(Msg::Fruit),
///             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.fruit.view(frame, frame.area());
///     }
///
///     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///         vec![viewport_changes(&self.viewport, Msg::Viewport)]
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Data handed to [`Model::init`].  Use `()` when nothing is needed.
    type Flags: Send + 'static;

    /// Build the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state.  Should be a pure function of `&self`.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be active for the current state.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
