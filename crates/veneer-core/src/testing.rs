use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// Headless harness that drives a [`Model`] without a terminal.
///
/// Immediate messages ([`Command::message`]) are queued and flushed by
/// [`drain_messages`](TestProgram::drain_messages).  Futures are parked in a
/// separate queue; [`resolve_futures`](TestProgram::resolve_futures) awaits
/// them in order, which lets a test interleave a viewport flip with an
/// in-flight implementation acquisition.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Form>::new(viewport);
/// prog.send(Msg::Viewport(ViewportClass::Compact));
/// prog.drain_messages();
/// assert!(prog.render_string(40, 3).contains("Pick a fruit"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    pending_futures: Vec<futures::future::BoxFuture<'static, M::Message>>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Build the model with [`Model::init`].
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            pending_futures: Vec::new(),
            quit: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Run one update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued immediate messages until none remain.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Number of futures waiting to be resolved.
    pub fn pending_futures(&self) -> usize {
        self.pending_futures.len()
    }

    /// Await every parked future, feed its message through `update`, and
    /// drain resulting immediate messages.
    pub async fn resolve_futures(&mut self) {
        while !self.pending_futures.is_empty() {
            let futures: Vec<_> = self.pending_futures.drain(..).collect();
            for fut in futures {
                let msg = fut.await;
                self.send(msg);
                self.drain_messages();
            }
        }
    }

    /// Whether the model returned [`Command::quit`].
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Shared access to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model, bypassing `update`.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render into a buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render and return the buffer as text, rows separated by newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::Terminal(_) => {}
            CommandInner::Action(Action::Message(msg)) => self.pending_messages.push(msg),
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Future(fut) => self.pending_futures.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer into text, one line per row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{Breakpoint, Viewport, ViewportClass};
    use ratatui::widgets::Paragraph;

    // Records the classes it has seen; acquires a label asynchronously.
    struct Probe {
        seen: Vec<ViewportClass>,
        label: Option<String>,
    }

    #[derive(Debug)]
    enum ProbeMsg {
        Viewport(ViewportClass),
        Loaded(String),
        Done,
    }

    impl Model for Probe {
        type Message = ProbeMsg;
        type Flags = Viewport;

        fn init(viewport: Viewport) -> (Self, Command<ProbeMsg>) {
            let class = viewport.class();
            (
                Probe {
                    seen: Vec::new(),
                    label: None,
                },
                Command::message(ProbeMsg::Viewport(class)),
            )
        }

        fn update(&mut self, msg: ProbeMsg) -> Command<ProbeMsg> {
            match msg {
                ProbeMsg::Viewport(class) => {
                    self.seen.push(class);
                    Command::perform(async move { class.to_string() }, ProbeMsg::Loaded)
                }
                ProbeMsg::Loaded(label) => {
                    self.label = Some(label);
                    Command::none()
                }
                ProbeMsg::Done => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            let text = self.label.as_deref().unwrap_or("loading");
            frame.render_widget(Paragraph::new(text), frame.area());
        }
    }

    fn program(width: u16) -> TestProgram<Probe> {
        TestProgram::<Probe>::new(Viewport::new(Breakpoint::new(100), width))
    }

    #[test]
    fn init_message_is_queued() {
        let mut prog = program(40);
        assert!(prog.model().seen.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().seen, vec![ViewportClass::Compact]);
    }

    #[test]
    fn futures_are_parked() {
        let mut prog = program(40);
        prog.drain_messages();
        assert_eq!(prog.pending_futures(), 1);
        assert_eq!(prog.render_string(10, 1).trim(), "loading");
    }

    #[tokio::test]
    async fn resolving_futures_updates_model() {
        let mut prog = program(140);
        prog.drain_messages();
        prog.resolve_futures().await;
        assert_eq!(prog.model().label.as_deref(), Some("regular"));
        assert!(prog.render_string(10, 1).starts_with("regular"));
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = program(40);
        prog.send(ProbeMsg::Done);
        assert!(prog.has_quit());
    }
}
