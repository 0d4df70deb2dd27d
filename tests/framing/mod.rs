
mod wire_encoding;
