// Owner-scoped resume CRUD. Every create and update is rescored with the
// canonical completion rules before it is persisted.

pub mod handlers;
