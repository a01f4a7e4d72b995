mod chat_loop;
mod support;
