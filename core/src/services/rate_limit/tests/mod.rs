mod in_memory_tests;
