use crate::models::Page;

/// Side effects an app asks the shell to perform after `update`
pub enum Command<Msg> {
    None,
    Batch(Vec<Command<Msg>>),
    /// Feed another message straight back into `update`
    Message(Msg),
    NavigateTo(Page),
    /// Blocking notice the user must dismiss
    Alert { title: String, body: String },
    Quit,
}

impl<Msg> Command<Msg> {
    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }

    pub fn navigate_to(page: Page) -> Self {
        Command::NavigateTo(page)
    }

    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Command::Alert {
            title: title.into(),
            body: body.into(),
        }
    }
}
