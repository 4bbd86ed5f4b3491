//! Backend collections and their paths.

/// Collection exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Domains,
    Tags,
    BlogPosts,
}

impl Resource {
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Domains => "domains",
            Self::Tags => "tags",
            Self::BlogPosts => "blogposts",
        }
    }

    /// Query appended to reads; domains and tags populate their relations.
    pub fn read_query(self) -> Option<&'static str> {
        match self {
            Self::Domains | Self::Tags => Some("populate=*"),
            Self::Categories | Self::BlogPosts => None,
        }
    }
}
