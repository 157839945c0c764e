mod tests_include_graph;
mod tests_symbol_merge;
