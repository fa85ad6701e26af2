// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The named documents of the record store.
///
/// Each collection is one JSON document addressed by a stable key. The key
/// doubles as the file name stem in the directory backend and as the change
/// signal payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The registered user collection.
    Users,
    /// The ticket collection.
    Tickets,
    /// The notification collection.
    Notifications,
    /// The category set.
    Categories,
    /// The singular current-session document.
    Session,
}

impl Collection {
    /// Every collection, in bootstrap order.
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Tickets,
        Self::Notifications,
        Self::Categories,
        Self::Session,
    ];

    /// Returns the stable document key for this collection.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tickets => "tickets",
            Self::Notifications => "notifications",
            Self::Categories => "categories",
            Self::Session => "session",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
