mod document_created;
mod helpers;
