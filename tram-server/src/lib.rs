//! Nantes tram assistant webhook.
//!
//! A Dialogflow fulfilment service answering questions about the Nantes
//! tram network: live waiting times, nearby stops, timetables read out one
//! slot per turn, and a saved favorite stop.

pub mod assistant;
pub mod cache;
pub mod config;
pub mod conversation;
pub mod domain;
pub mod tan;
pub mod web;
