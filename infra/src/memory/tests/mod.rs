mod token_repository_tests;
