//! Unit tests for the pure parts of the music pipeline
