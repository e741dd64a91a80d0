pub mod emotion_provider;
pub mod emotion_service;
pub mod keyword_heuristic;
pub mod watson_provider;
