//! Compiled-in member roster
//!
//! The club roster is static: names and photos change with a rebuild, not at
//! runtime. Photo paths are copied into progress entries at update time
//! rather than joined at read time, so old entries keep the photo they were
//! written with.

use crate::error::{Error, Result};

/// A club member and their dashboard photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub picture: &'static str,
}

/// All known members, in form-select order
pub const MEMBERS: &[Member] = &[
    Member { name: "Lindy", picture: "photos/Lindy.png" },
    Member { name: "Madison", picture: "photos/Madison.png" },
    Member { name: "Justine", picture: "photos/Justine.jpeg" },
    Member { name: "Liz", picture: "photos/Liz.png" },
    Member { name: "Maria", picture: "photos/Maria.jpeg" },
    Member { name: "Anna", picture: "photos/Anna.jpeg" },
    Member { name: "Kelsie", picture: "photos/Kelsie.png" },
    Member { name: "Caroline", picture: "photos/Caroline.png" },
];

/// Look up a member by display name
pub fn lookup(name: &str) -> Result<&'static Member> {
    MEMBERS
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| Error::Lookup(name.to_string()))
}
