mod report;
mod scheduler;
