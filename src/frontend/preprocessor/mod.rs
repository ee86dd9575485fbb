pub use self::comments::clean_comments;

mod comments;
