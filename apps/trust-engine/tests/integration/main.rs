mod helpers;
mod test_content_flows;
mod test_evaluation;
