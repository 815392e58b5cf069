mod tests_events;
mod tests_lexer;
