// Dialogue system
//
// - `page`: pages of text and the choices branching off them
// - `textbox`: reveals pages over time and walks the choice tree
// - `tree`: dialogue file descriptors

pub mod page;
pub mod textbox;
pub mod tree;

pub use page::{Choice, TextBoxPage, DEFAULT_CPS};
pub use textbox::TextBox;
pub use tree::{ChoiceDescriptor, DialogueDescriptor, PageDescriptor};
