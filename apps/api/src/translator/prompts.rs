// Prompt templates for natural-language → Cypher translation.

/// System prompt: the rule set the generated query must follow.
pub const CYPHER_SYSTEM: &str = "\
You are an expert at converting natural language questions into Cypher queries for Neo4j graph databases.

Guidelines for generating high-quality Cypher queries:
1. Use appropriate pattern matching to navigate the graph
2. Use WHERE clauses to filter results when necessary
3. Include RETURN statements with meaningful aliases
4. Use ORDER BY, LIMIT, or aggregation functions when appropriate
5. For complex queries, consider using WITH clauses to pipe results
6. Return only the information that directly answers the question
7. Generate executable Cypher code only, no explanations
8. Convert the question to lower case and do not emit escape sequences such as \\n";

/// User prompt template. Replace `{schema}` and `{question}` before sending.
pub const CYPHER_PROMPT_TEMPLATE: &str = "\
Based on the Neo4j graph schema below, write a Cypher query that would answer the user's question:

{schema}

Example queries:
1. Question: Find people who know python
   Cypher: MATCH (p:Person)-[:HAS_SKILL]->(s:Skill) WHERE s.name = 'python' RETURN p.name
2. Question: Which skills are most in demand for jobs?
   Cypher: MATCH (:Job)-[:REQUIRES_SKILL]->(s:Skill) RETURN s.name, count(*) as demand ORDER BY demand DESC

Question: {question}
Cypher query:";
