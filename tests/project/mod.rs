mod tests_filesystem;
