//! Accessibility roles and actions as closed enums.
//!
//! Providers report roles and actions as strings (`"AXButton"`, `"AXPress"`).
//! Both enums convert losslessly from and to those strings, keeping anything
//! unrecognised in an `Unknown` variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Define a string-backed enum with an `Unknown(String)` fallback.
macro_rules! ax_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $ax:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
            /// A value this crate does not classify.
            Unknown(String),
        }

        impl $name {
            /// Parse a provider string.
            pub fn from_ax(s: &str) -> Self {
                match s {
                    $($ax => Self::$variant,)*
                    other => Self::Unknown(other.to_string()),
                }
            }

            /// The provider string for this value.
            pub fn as_ax(&self) -> &str {
                match self {
                    $(Self::$variant => $ax,)*
                    Self::Unknown(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_ax(&s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_ax(s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_ax().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ax())
            }
        }
    };
}

ax_enum! {
    /// The kind of UI element a node represents.
    Role {
        /// Top-level window.
        Window => "AXWindow",
        /// Scrollable viewport.
        ScrollArea => "AXScrollArea",
        /// Table or outline row.
        Row => "AXRow",
        /// Paged container.
        Page => "AXPage",
        /// Generic grouping container.
        Group => "AXGroup",
        /// Table view.
        Table => "AXTable",
        /// Outline (tree) view.
        Outline => "AXOutline",
        /// Rendered web content.
        WebArea => "AXWebArea",
        /// Rich text view.
        TextArea => "AXTextArea",
        /// Open menu.
        Menu => "AXMenu",
        /// Application or extras menu bar.
        MenuBar => "AXMenuBar",
        /// Entry in a menu bar.
        MenuBarItem => "AXMenuBarItem",
        /// Entry in a menu.
        MenuItem => "AXMenuItem",
        /// Push button.
        Button => "AXButton",
        /// Check box.
        CheckBox => "AXCheckBox",
        /// Radio button.
        RadioButton => "AXRadioButton",
        /// Hyperlink.
        Link => "AXLink",
        /// Editable text field.
        TextField => "AXTextField",
        /// Static label.
        StaticText => "AXStaticText",
        /// Image.
        Image => "AXImage",
        /// Table cell.
        Cell => "AXCell",
    }
}

ax_enum! {
    /// Something a node can be asked to do.
    Action {
        /// Primary activation.
        Press => "AXPress",
        /// Open a context menu.
        ShowMenu => "AXShowMenu",
        /// Scroll the node into view.
        ScrollToVisible => "AXScrollToVisible",
        /// Reveal alternate UI (e.g. hover controls).
        ShowAlternateUI => "AXShowAlternateUI",
        /// Return to the default UI.
        ShowDefaultUI => "AXShowDefaultUI",
        /// Confirm.
        Confirm => "AXConfirm",
        /// Cancel.
        Cancel => "AXCancel",
        /// Pick a value.
        Pick => "AXPick",
        /// Raise a window.
        Raise => "AXRaise",
        /// Increment a value.
        Increment => "AXIncrement",
        /// Decrement a value.
        Decrement => "AXDecrement",
    }
}

impl Role {
    /// Roles that never receive a hint of their own.
    pub fn is_never_hinted(&self) -> bool {
        matches!(self, Self::Window | Self::ScrollArea)
    }

    /// Roles whose effective frame clips their descendants.
    pub fn clips_children(&self) -> bool {
        matches!(
            self,
            Self::Window | Self::ScrollArea | Self::Row | Self::Page | Self::Group
        )
    }

    /// Roles whose children are their visible rows.
    pub fn is_row_container(&self) -> bool {
        matches!(self, Self::Table | Self::Outline)
    }

    /// Roles hosting rich text or web content.
    pub fn is_rich_content(&self) -> bool {
        matches!(self, Self::WebArea | Self::TextArea)
    }
}

impl Action {
    /// Actions every element tends to expose; they alone do not make a node
    /// worth hinting.
    pub fn is_incidental(&self) -> bool {
        matches!(
            self,
            Self::ShowMenu | Self::ScrollToVisible | Self::ShowAlternateUI | Self::ShowDefaultUI
        )
    }
}
