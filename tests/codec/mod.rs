mod tests_documents;
mod tests_roundtrip;
