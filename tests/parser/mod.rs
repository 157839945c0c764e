mod tests_declarations;
