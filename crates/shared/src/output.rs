use serde::{Deserialize, Serialize};

/// Trait for a type that can output information about osgirun processes
pub trait OsgiRunOutput {
	/// Base function for a simple message. Used as a fallback
	fn display_text(&mut self, text: String, level: MessageLevel);

	/// Function to display a message to the user
	fn display_message(&mut self, message: Message) {
		self.display_text(message.contents.default_format(), message.level);
	}

	/// Convenience function to remove the need to construct a message
	fn display(&mut self, contents: MessageContents, level: MessageLevel) {
		self.display_message(Message { contents, level })
	}

	/// Start a process of multiple messages. Implementations can use this to replace a line
	/// multiple times
	fn start_process(&mut self) {}

	/// End an existing process
	fn end_process(&mut self) {}

	/// Start a new section / level of hierarchy. Implementations can use this to set the indent level
	fn start_section(&mut self) {}

	/// End the current section and go down a level of hierarchy
	fn end_section(&mut self) {}
}

/// A message supplied to the output
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
	/// The contents of the message
	pub contents: MessageContents,
	/// The printing level of the message
	pub level: MessageLevel,
}

/// Contents of a message. Different types represent different formatting
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum MessageContents {
	/// Simple message with no formatting
	Simple(String),
	/// An important notice to the user
	Notice(String),
	/// A warning to the user
	Warning(String),
	/// An error
	Error(String),
	/// A success / finish message
	Success(String),
	/// A key-value property
	Property(String, Box<MessageContents>),
	/// A header / big message
	Header(String),
	/// An start of some long running process. Usually ends with ...
	StartProcess(String),
	/// A message with an associated value displayed along with it.
	Associated(Box<MessageContents>, Box<MessageContents>),
	/// A filesystem path or URL
	Path(String),
	/// An item in an unordered list
	ListItem(Box<MessageContents>),
}

impl MessageContents {
	/// Message formatting for the default implementation
	pub fn default_format(self) -> String {
		match self {
			MessageContents::Simple(text)
			| MessageContents::Success(text)
			| MessageContents::Path(text) => text,
			MessageContents::Notice(text) => format!("Notice: {text}"),
			MessageContents::Warning(text) => format!("Warning: {text}"),
			MessageContents::Error(text) => format!("Error: {text}"),
			MessageContents::Property(key, value) => {
				format!("{key}: {}", value.default_format())
			}
			MessageContents::Header(text) => text.to_uppercase(),
			MessageContents::StartProcess(text) => format!("{text}..."),
			MessageContents::Associated(item, message) => {
				format!("[{}] {}", item.default_format(), message.default_format())
			}
			MessageContents::ListItem(item) => format!(" - {}", item.default_format()),
		}
	}
}

/// The level of logging that a message has
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
	/// Messages that should always be displayed
	Important,
	/// Messages that can be displayed but are not required
	Extra,
	/// Debug-level messages. Good for logging but should not be displayed to
	/// the user unless they ask
	Debug,
	/// Very Debug-level messages. Should only be used for logging
	Trace,
}

impl MessageLevel {
	/// Checks if this level is at least another level
	pub fn at_least(&self, other: &Self) -> bool {
		match &self {
			Self::Important => matches!(
				other,
				Self::Important | Self::Extra | Self::Debug | Self::Trace
			),
			Self::Extra => matches!(other, Self::Extra | Self::Debug | Self::Trace),
			Self::Debug => matches!(other, Self::Debug | Self::Trace),
			Self::Trace => matches!(other, Self::Trace),
		}
	}
}

/// Dummy OsgiRunOutput that doesn't print anything
pub struct NoOp;

impl OsgiRunOutput for NoOp {
	fn display_text(&mut self, _text: String, _level: MessageLevel) {}
}

/// OsgiRunOutput with simple terminal printing
pub struct Simple(pub MessageLevel);

impl OsgiRunOutput for Simple {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		if !level.at_least(&self.0) {
			return;
		}

		println!("{text}");
	}
}

/// OsgiRunOutput that keeps every message it is given. Useful for inspecting
/// what a routine reported
#[derive(Debug, Default)]
pub struct Collect {
	/// The messages that were displayed, in order
	pub messages: Vec<Message>,
}

impl OsgiRunOutput for Collect {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		self.display_message(Message {
			contents: MessageContents::Simple(text),
			level,
		});
	}

	fn display_message(&mut self, message: Message) {
		self.messages.push(message);
	}
}

impl Collect {
	/// Get the default formatting of all messages at or above a level
	pub fn texts_at(&self, level: MessageLevel) -> Vec<String> {
		self.messages
			.iter()
			.filter(|x| x.level.at_least(&level))
			.map(|x| x.contents.clone().default_format())
			.collect()
	}
}

/// RAII struct that opens and closes an output process
pub struct OutputProcess<'a, O: OsgiRunOutput>(pub &'a mut O);

impl<'a, O> OutputProcess<'a, O>
where
	O: OsgiRunOutput,
{
	/// Create a new OutputProcess from an OsgiRunOutput
	pub fn new(o: &'a mut O) -> Self {
		o.start_process();
		Self(o)
	}
}

impl<'a, O> Drop for OutputProcess<'a, O>
where
	O: OsgiRunOutput,
{
	fn drop(&mut self) {
		self.0.end_process();
	}
}
