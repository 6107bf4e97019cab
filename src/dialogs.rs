//! Operator dialogs: file and folder pickers, yes/no confirmation.

use std::path::PathBuf;

/// Modal dialogs shown to the operator. Cancellation yields `None`/`false`.
pub trait Dialogs {
    /// `filters` pairs a label with the extensions it admits.
    fn pick_file(&self, title: &str, filters: &[(&str, &[&str])]) -> Option<PathBuf>;

    fn pick_directory(&self, title: &str) -> Option<PathBuf>;

    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Native dialogs backed by `rfd`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_file(&self, title: &str, filters: &[(&str, &[&str])]) -> Option<PathBuf> {
        use rfd::FileDialog;

        let mut dialog = FileDialog::new().set_title(title);
        for (name, extensions) in filters {
            dialog = dialog.add_filter(*name, *extensions);
        }
        dialog.pick_file()
    }

    fn pick_directory(&self, title: &str) -> Option<PathBuf> {
        rfd::FileDialog::new().set_title(title).pick_folder()
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        result == MessageDialogResult::Yes
    }
}

#[cfg(test)]
pub mod testing {
    use super::Dialogs;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::PathBuf;

    /// Answers dialogs from a script and records the titles shown.
    #[derive(Default)]
    pub struct ScriptedDialogs {
        pub file: Option<PathBuf>,
        pub directories: RefCell<VecDeque<Option<PathBuf>>>,
        pub confirm_answer: bool,
        pub titles: RefCell<Vec<String>>,
    }

    impl ScriptedDialogs {
        pub fn new(file: Option<PathBuf>, directories: Vec<Option<PathBuf>>) -> Self {
            Self {
                file,
                directories: RefCell::new(directories.into()),
                ..Self::default()
            }
        }
    }

    impl Dialogs for ScriptedDialogs {
        fn pick_file(&self, title: &str, _filters: &[(&str, &[&str])]) -> Option<PathBuf> {
            self.titles.borrow_mut().push(title.to_string());
            self.file.clone()
        }

        fn pick_directory(&self, title: &str) -> Option<PathBuf> {
            self.titles.borrow_mut().push(title.to_string());
            self.directories.borrow_mut().pop_front().flatten()
        }

        fn confirm(&self, title: &str, _message: &str) -> bool {
            self.titles.borrow_mut().push(title.to_string());
            self.confirm_answer
        }
    }
}
