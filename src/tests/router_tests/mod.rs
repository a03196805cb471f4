mod agent_tests;
mod search_tests;
